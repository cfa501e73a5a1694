//! Quadrature encoder decoder
//!
//! Counts every valid edge of the A/B channels (4 ticks per detent on a
//! typical panel encoder). Invalid transitions, where both channels change
//! at once, are treated as noise and ignored.
//!
//! Polled: call [`Quadrature::poll`] often enough that no two edges are
//! missed between calls (a few hundred microseconds for a hand-turned knob).

use embedded_hal::digital::InputPin;

use spotjig_core::traits::Encoder;

/// Tick delta indexed by `(previous << 2) | current`, state = `(a << 1) | b`
const TRANSITIONS: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0,
];

/// Quadrature decoder over two input pins
pub struct Quadrature<A, B> {
    a: A,
    b: B,
    state: u8,
    count: i32,
}

impl<A: InputPin, B: InputPin> Quadrature<A, B> {
    /// Create a decoder, sampling the current pin levels as the start state
    pub fn new(a: A, b: B) -> Self {
        let mut enc = Self {
            a,
            b,
            state: 0,
            count: 0,
        };
        enc.state = enc.sample();
        enc
    }

    fn sample(&mut self) -> u8 {
        let a = self.a.is_high().unwrap_or(false) as u8;
        let b = self.b.is_high().unwrap_or(false) as u8;
        (a << 1) | b
    }

    /// Sample the pins and update the count
    ///
    /// Returns the tick delta of this sample (-1, 0 or 1).
    pub fn poll(&mut self) -> i32 {
        let state = self.sample();
        self.apply(state)
    }

    fn apply(&mut self, state: u8) -> i32 {
        let delta = TRANSITIONS[((self.state << 2) | state) as usize] as i32;
        self.state = state;
        self.count = self.count.wrapping_add(delta);
        delta
    }

    /// Accumulated ticks
    pub fn count(&self) -> i32 {
        self.count
    }
}

impl<A: InputPin, B: InputPin> Encoder for Quadrature<A, B> {
    fn read_raw_ticks(&mut self) -> i32 {
        self.poll();
        self.count
    }
}
