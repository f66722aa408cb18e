use embassy_time::Duration;

use crate::SEGMENT_DELAY_MS;

/// Runtime configuration of the command interpreter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterpreterConfig {
    /// Pause inserted after each split-off segment of a `||` macro chain
    pub segment_delay: Duration,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            segment_delay: Duration::from_millis(SEGMENT_DELAY_MS),
        }
    }
}
