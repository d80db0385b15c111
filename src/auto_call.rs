//! Auto-call countdown.
//!
//! While enabled, a number is due every `interval_ms`. The timer is driven by
//! elapsed milliseconds from the caller's loop, so it is testable without a
//! real clock.

#[derive(Debug, Clone)]
pub struct AutoCall {
    interval_ms: u32,
    remaining_ms: u32,
    enabled: bool,
}

impl AutoCall {
    pub fn new(interval_ms: u32, enabled: bool) -> Self {
        let interval_ms = interval_ms.max(1);
        Self {
            interval_ms,
            remaining_ms: interval_ms,
            enabled,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time left before the next call, `None` while disabled.
    pub fn remaining_ms(&self) -> Option<u32> {
        self.enabled.then_some(self.remaining_ms)
    }

    /// Turning it on restarts the countdown.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.restart();
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.restart();
    }

    /// Start the countdown over (after a manual call or a reset).
    pub fn restart(&mut self) {
        self.remaining_ms = self.interval_ms;
    }

    /// Advance by `elapsed_ms`. Returns true when a call is due; the countdown
    /// then restarts. At most one call is due per tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.enabled {
            return false;
        }
        if elapsed_ms >= self.remaining_ms {
            self.restart();
            return true;
        }
        self.remaining_ms -= elapsed_ms;
        false
    }

    /// Milliseconds the loop may sleep before the next tick matters.
    pub fn poll_timeout_ms(&self, max_ms: u32) -> u32 {
        match self.remaining_ms() {
            Some(ms) => ms.min(max_ms),
            None => max_ms,
        }
    }
}
