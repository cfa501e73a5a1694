//! Events that trigger mode transitions

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Main menu
    /// Operator picked "Automatic Mode"
    EnterAuto,
    /// Operator picked "Manual Mode"
    EnterManual,

    // Automatic path
    /// Operator picked "Start" in the automatic menu
    StartRun,
    /// Every grid cell was visited
    RunComplete,
    /// Operator chose "Exit" at a decision gate
    RunAborted,

    // Manual path
    /// Operator picked the X axis
    JogX,
    /// Operator picked the Y axis
    JogY,
    /// Operator picked the probe (Z) axis
    JogZ,

    /// Go back one level
    Back,
}
