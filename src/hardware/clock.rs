/*!
 * Clock
 * Raises a clock interrupt every fixed number of instruction cycles
 */

use crate::core::limits::DEFAULT_CLOCK_INTERVAL;

#[derive(Debug)]
pub struct Clock {
    interval: u64,
    countdown: u64,
}

impl Clock {
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_CLOCK_INTERVAL)
    }

    #[must_use]
    pub fn with_interval(interval: u64) -> Self {
        Self {
            interval,
            countdown: interval,
        }
    }

    /// Advance one instruction cycle; true means "raise the clock interrupt"
    pub fn update(&mut self) -> bool {
        if self.countdown > 0 {
            self.countdown -= 1;
            false
        } else {
            self.countdown = self.interval;
            true
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
