//! Percentage progress of one simulated download.

/// Upper bound of the progress scale.
pub const COMPLETE: f64 = 100.0;

/// Progress in `[0, 100]`, never decreasing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f64);

impl Progress {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 >= COMPLETE
    }

    /// Adds `increment` and clamps to 100. Negative or NaN increments are
    /// treated as zero. Returns true when this call reached 100.
    pub fn advance(&mut self, increment: f64) -> bool {
        if self.is_complete() {
            return false;
        }
        let step = if increment.is_finite() && increment > 0.0 { increment } else { 0.0 };
        self.0 = (self.0 + step).min(COMPLETE);
        self.is_complete()
    }

    /// Whole percent for display.
    pub fn percent(self) -> u8 {
        self.0.floor() as u8
    }
}
