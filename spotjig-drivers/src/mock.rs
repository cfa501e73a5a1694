//! Fake embedded-hal peripherals for driver tests

use core::cell::Cell;
use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::i2c::{self, I2c, Operation};
use embedded_hal::pwm::{self, SetDutyCycle};

/// Output pin that counts rising edges
#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
    pub rising_edges: usize,
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.rising_edges += 1;
        }
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }
}

/// Input pin whose level lives in a cell owned by the test
pub struct LevelPin<'a>(pub &'a Cell<bool>);

impl digital::ErrorType for LevelPin<'_> {
    type Error = Infallible;
}

impl InputPin for LevelPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// I2C bus that records written bytes
#[derive(Debug, Default)]
pub struct MockI2c {
    pub address: Option<u8>,
    pub written: Vec<u8>,
    /// Fail every transaction
    pub fail: bool,
}

impl i2c::ErrorType for MockI2c {
    type Error = i2c::ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(i2c::ErrorKind::NoAcknowledge(
                i2c::NoAcknowledgeSource::Address,
            ));
        }
        self.address = Some(address);
        for op in operations {
            match op {
                Operation::Write(bytes) => self.written.extend_from_slice(bytes),
                Operation::Read(buf) => buf.fill(0),
            }
        }
        Ok(())
    }
}

/// Delay that returns immediately
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// PWM channel with a 20000-count period
#[derive(Debug, Default)]
pub struct MockPwm {
    pub duty: u16,
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        20_000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}
