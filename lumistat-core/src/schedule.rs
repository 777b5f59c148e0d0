//! Tick cadence bookkeeping
//!
//! The background loop wakes on a fixed liveness cadence and runs a panel
//! tick only when the tick deadline has been reached. The deadline is an
//! explicit value recomputed after each fire; the loop parks between
//! wakeups instead of busy-polling.

/// Default panel tick interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 2_000;

/// Default liveness yield interval in milliseconds
///
/// The background loop must return control to the executor at least this
/// often; the hardware watchdog is fed on the same cadence.
pub const DEFAULT_YIELD_INTERVAL_MS: u32 = 250;

/// Background loop timing parameters, immutable after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleConfig {
    /// Panel tick cadence
    pub tick_interval_ms: u32,
    /// Mandatory liveness yield cadence
    pub yield_interval_ms: u32,
}

impl ScheduleConfig {
    /// Schedule with the configured tick interval and the standard
    /// liveness cadence
    pub const fn new(tick_interval_ms: u32) -> Self {
        Self {
            tick_interval_ms,
            yield_interval_ms: DEFAULT_YIELD_INTERVAL_MS,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL_MS)
    }
}

/// Next-fire deadline for the panel tick
///
/// Freshly constructed deadlines are immediately due so the first pass
/// through the loop always ticks.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickDeadline {
    interval_ms: u32,
    next_ms: u64,
}

impl TickDeadline {
    /// Create a deadline with the given interval, due immediately
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            next_ms: 0,
        }
    }

    /// Whether the deadline has been reached
    pub fn due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_ms
    }

    /// Rearm after a fire: next deadline is one interval from now
    pub fn rearm(&mut self, now_ms: u64) {
        self.next_ms = now_ms + self.interval_ms as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_deadline_is_due_immediately() {
        let deadline = TickDeadline::new(2_000);
        assert!(deadline.due(0));
    }

    #[test]
    fn rearm_pushes_one_interval_forward() {
        let mut deadline = TickDeadline::new(2_000);
        deadline.rearm(1_000);
        assert!(!deadline.due(2_999));
        assert!(deadline.due(3_000));
    }

    #[test]
    fn deadline_is_relative_to_fire_time_not_schedule() {
        // A late fire does not accumulate backlog: rearm from now
        let mut deadline = TickDeadline::new(1_000);
        deadline.rearm(5_500);
        assert!(!deadline.due(6_000));
        assert!(deadline.due(6_500));
    }
}
