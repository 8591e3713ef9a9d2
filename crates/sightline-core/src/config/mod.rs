//! Runtime settings and timing constants.
//!
//! - `Settings` - one immutable snapshot per traversal pass
//! - `SharedSettings` - single-writer cell the control thread updates
//! - Filter policies for health and life-state checks

mod settings;

pub use settings::*;

/// Frame loop timing.
pub mod timing {
    use std::time::Duration;

    /// Default delay between traversal passes (ms).
    pub const DEFAULT_FRAME_DELAY_MS: u64 = 15;

    /// Bounds applied when the delay is adjusted at runtime (ms).
    pub const MIN_FRAME_DELAY_MS: u64 = 1;
    pub const MAX_FRAME_DELAY_MS: u64 = 1000;

    /// Step used by the `+`/`-` hot-keys (ms).
    pub const FRAME_DELAY_STEP_MS: u64 = 5;

    /// How long a fatal startup error stays on screen before exit.
    pub const FATAL_EXIT_DELAY: Duration = Duration::from_secs(5);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_constants() {
        assert!(timing::MIN_FRAME_DELAY_MS <= timing::DEFAULT_FRAME_DELAY_MS);
        assert!(timing::DEFAULT_FRAME_DELAY_MS <= timing::MAX_FRAME_DELAY_MS);
        assert_eq!(timing::FATAL_EXIT_DELAY.as_secs(), 5);
    }
}
