//! Encoder detent deltas

use crate::traits::Encoder;

/// Raw quadrature ticks per mechanical detent
pub const TICKS_PER_DETENT: i32 = 4;

/// Current encoder position in whole detents
///
/// Uses floor division so every detent spans exactly four ticks, including
/// the ones either side of zero.
pub fn detents<E: Encoder>(encoder: &mut E) -> i32 {
    encoder.read_raw_ticks().div_euclid(TICKS_PER_DETENT)
}

/// Detents crossed since `baseline`
///
/// Returns the signed delta and the baseline to store for the next call.
/// The delta is zero when no detent has been crossed.
pub fn tick_delta<E: Encoder>(encoder: &mut E, baseline: i32) -> (i32, i32) {
    let now = detents(encoder);
    (now.wrapping_sub(baseline), now)
}

/// Stored detent baseline for one handler context
///
/// Captured on entry into a handler, then advanced on every delta read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderBaseline(i32);

impl EncoderBaseline {
    /// Baseline at detent zero
    pub const fn new() -> Self {
        Self(0)
    }

    /// Capture the encoder's current position as the baseline
    pub fn capture<E: Encoder>(encoder: &mut E) -> Self {
        Self(detents(encoder))
    }

    /// Re-capture the baseline in place
    pub fn reset<E: Encoder>(&mut self, encoder: &mut E) {
        *self = Self::capture(encoder);
    }

    /// Detents crossed since the last read, advancing the baseline
    pub fn delta<E: Encoder>(&mut self, encoder: &mut E) -> i32 {
        let (delta, now) = tick_delta(encoder, self.0);
        self.0 = now;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimEncoder;

    #[test]
    fn test_partial_detent_is_zero() {
        let mut enc = SimEncoder::default();
        let (delta, baseline) = tick_delta(&mut enc, 0);
        assert_eq!((delta, baseline), (0, 0));

        enc.ticks = 3;
        assert_eq!(tick_delta(&mut enc, 0), (0, 0));

        enc.ticks = 4;
        assert_eq!(tick_delta(&mut enc, 0), (1, 1));
    }

    #[test]
    fn test_negative_detents() {
        let mut enc = SimEncoder { ticks: -1 };
        assert_eq!(detents(&mut enc), -1);

        enc.ticks = -4;
        assert_eq!(detents(&mut enc), -1);

        enc.ticks = -5;
        assert_eq!(detents(&mut enc), -2);
    }

    #[test]
    fn test_baseline_advances() {
        let mut enc = SimEncoder::default();
        let mut baseline = EncoderBaseline::capture(&mut enc);

        enc.turn(3);
        assert_eq!(baseline.delta(&mut enc), 3);
        assert_eq!(baseline.delta(&mut enc), 0);

        enc.turn(-5);
        assert_eq!(baseline.delta(&mut enc), -5);
        assert_eq!(baseline, EncoderBaseline(-2));
    }

    #[test]
    fn test_capture_absorbs_earlier_motion() {
        let mut enc = SimEncoder::default();
        enc.turn(7);
        let mut baseline = EncoderBaseline::capture(&mut enc);
        assert_eq!(baseline.delta(&mut enc), 0);
    }
}
