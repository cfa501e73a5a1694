//! Rotary encoder trait

/// Raw quadrature tick counter
///
/// The count is cumulative over the life of the process. One mechanical
/// detent corresponds to [`crate::input::TICKS_PER_DETENT`] ticks.
pub trait Encoder {
    /// Read the cumulative raw tick count
    fn read_raw_ticks(&mut self) -> i32;
}
