//! Fixed-interval gate over a free-running millisecond counter.

/// Fires once every `interval` milliseconds of a wrapping `u32` clock.
///
/// Each fire moves the deadline forward by exactly one interval, not to
/// `now`.  A late caller therefore fires on consecutive calls until it
/// has caught up, one interval per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalGate {
    start_ms: u32,
}

impl IntervalGate {
    pub const fn new(start_ms: u32) -> Self {
        Self { start_ms }
    }

    /// Returns `true` and advances the gate if `interval_ms` has elapsed.
    pub fn try_fire(&mut self, now_ms: u32, interval_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.start_ms) < interval_ms {
            return false;
        }
        self.start_ms = self.start_ms.wrapping_add(interval_ms);
        true
    }

    /// Milliseconds until the next fire; 0 when already due.
    pub fn remaining(&self, now_ms: u32, interval_ms: u32) -> u32 {
        interval_ms.saturating_sub(now_ms.wrapping_sub(self.start_ms))
    }
}
