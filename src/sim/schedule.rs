//! Logical time and scheduling
//!
//! Engines never read a wall clock. The host advances a `LogicalClock`, and
//! periodic work (`IntervalTicker`) or one-shot expiries (`Deadline`) are
//! polled against it. Rearming an interval is an explicit `reschedule`.

/// Maximum ticks fired per poll to prevent spiral of death after a long stall
pub const MAX_CATCH_UP_TICKS: u32 = 8;

/// Monotonic millisecond clock driven by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalClock {
    now_ms: u64,
}

impl LogicalClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Advance by `dt_ms` and return the new time
    pub fn advance(&mut self, dt_ms: u64) -> u64 {
        self.now_ms = self.now_ms.saturating_add(dt_ms);
        self.now_ms
    }
}

/// Periodic timer with cancel-and-rearm semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTicker {
    interval_ms: u64,
    next_due_ms: Option<u64>,
    fired_this_poll: u32,
}

impl IntervalTicker {
    /// Armed ticker; first fire one interval after `now`
    pub fn new(interval_ms: u64, now: u64) -> Self {
        let mut ticker = Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: None,
            fired_this_poll: 0,
        };
        ticker.reschedule(interval_ms, now);
        ticker
    }

    #[inline]
    pub fn interval(&self) -> u64 {
        self.interval_ms
    }

    /// Cancel the current schedule and rearm at a new interval from `now`
    pub fn reschedule(&mut self, interval_ms: u64, now: u64) {
        self.interval_ms = interval_ms.max(1);
        self.next_due_ms = Some(now.saturating_add(self.interval_ms));
    }

    /// Stop firing until rescheduled
    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    /// Start a new poll at `now` (resets the catch-up budget)
    pub fn begin_poll(&mut self) {
        self.fired_this_poll = 0;
    }

    /// Fire once if due at `now`, returning the scheduled time of that tick
    ///
    /// Call repeatedly to catch up. After `MAX_CATCH_UP_TICKS` in one poll
    /// the backlog is dropped and the ticker rearms from `now`.
    pub fn fire(&mut self, now: u64) -> Option<u64> {
        let due = self.next_due_ms?;
        if due > now {
            return None;
        }
        if self.fired_this_poll >= MAX_CATCH_UP_TICKS {
            log::debug!("Ticker dropped backlog at {}ms", now);
            self.reschedule(self.interval_ms, now);
            return None;
        }
        self.fired_this_poll += 1;
        self.next_due_ms = Some(due.saturating_add(self.interval_ms));
        Some(due)
    }
}

/// One-shot expiry timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at_ms: Option<u64>,
}

impl Deadline {
    /// Arm (or re-arm) to expire `duration_ms` after `now`
    pub fn arm(&mut self, now: u64, duration_ms: u64) {
        self.at_ms = Some(now.saturating_add(duration_ms));
    }

    pub fn cancel(&mut self) {
        self.at_ms = None;
    }

    /// True once `now` reaches the deadline; false when not armed
    pub fn expired(&self, now: u64) -> bool {
        self.at_ms.is_some_and(|at| now >= at)
    }

    /// Milliseconds left, if armed
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.at_ms.map(|at| at.saturating_sub(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(ticker: &mut IntervalTicker, now: u64) -> Vec<u64> {
        ticker.begin_poll();
        std::iter::from_fn(|| ticker.fire(now)).collect()
    }

    #[test]
    fn test_ticker_fires_on_interval() {
        let mut ticker = IntervalTicker::new(100, 0);
        assert!(drain(&mut ticker, 99).is_empty());
        assert_eq!(drain(&mut ticker, 100), vec![100]);
        assert_eq!(drain(&mut ticker, 350), vec![200, 300]);
    }

    #[test]
    fn test_reschedule_rearms_from_now() {
        let mut ticker = IntervalTicker::new(100, 0);
        assert_eq!(drain(&mut ticker, 100), vec![100]);
        ticker.reschedule(90, 100);
        assert!(drain(&mut ticker, 189).is_empty());
        assert_eq!(drain(&mut ticker, 190), vec![190]);
        assert_eq!(ticker.interval(), 90);
    }

    #[test]
    fn test_cancelled_ticker_is_silent() {
        let mut ticker = IntervalTicker::new(10, 0);
        ticker.cancel();
        assert!(drain(&mut ticker, 1_000).is_empty());
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut ticker = IntervalTicker::new(10, 0);
        let fired = drain(&mut ticker, 10_000);
        assert_eq!(fired.len(), MAX_CATCH_UP_TICKS as usize);
        // Rearmed from the stall point
        assert!(drain(&mut ticker, 10_009).is_empty());
        assert_eq!(drain(&mut ticker, 10_010), vec![10_010]);
    }

    #[test]
    fn test_deadline() {
        let mut deadline = Deadline::default();
        assert!(!deadline.expired(u64::MAX));

        deadline.arm(1_000, 5_000);
        assert!(!deadline.expired(5_999));
        assert_eq!(deadline.remaining(5_000), Some(1_000));
        assert!(deadline.expired(6_000));

        // Refresh pushes the expiry out
        deadline.arm(5_500, 5_000);
        assert!(!deadline.expired(6_000));

        deadline.cancel();
        assert!(!deadline.expired(20_000));
        assert_eq!(deadline.remaining(0), None);
    }

    #[test]
    fn test_clock_advances() {
        let mut clock = LogicalClock::new();
        assert_eq!(clock.advance(16), 16);
        assert_eq!(clock.advance(17), 33);
        assert_eq!(clock.now(), 33);
    }
}
