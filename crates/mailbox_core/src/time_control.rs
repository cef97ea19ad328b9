//! Search limits and the wall-clock deadline the search polls.
//!
//! The search is single-threaded, so the clock is only read at a handful of
//! points (between iterations, between root moves and every
//! `check_interval` nodes). The stop flag is shared so a driver holding a
//! clone can still cut a search short.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Search limits that control when an engine should stop searching.
///
/// Depth and time are both honoured; whichever runs out first ends the
/// search, and on timeout the best move of the last finished depth is kept.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies (half-moves)
    pub depth: u8,
    /// Maximum time allowed for this move (None = infinite)
    pub move_time: Option<Duration>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            move_time: None,
            time_control: TimeControl::new(None),
        }
    }

    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            move_time: Some(move_time),
            time_control: TimeControl::new(Some(move_time)),
        }
    }

    /// Budget for one move out of a clock: a thirtieth of what is left plus
    /// most of the increment, never below a millisecond.
    pub fn from_clock(depth: u8, remaining: Duration, increment: Duration) -> Self {
        let budget = remaining / 30 + increment * 3 / 4;
        let budget = budget.min(remaining.saturating_sub(Duration::from_millis(50)));
        Self::depth_and_time(depth, budget.max(Duration::from_millis(1)))
    }

    /// Start the clock. Call this when search begins.
    pub fn start(&mut self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Option<Instant>,
    /// None = infinite
    time_limit: Option<Duration>,
    /// How often to read the clock, in nodes.
    check_interval: u64,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: None,
            time_limit,
            check_interval: 1024,
        }
    }

    pub fn with_check_interval(mut self, nodes: u64) -> Self {
        self.check_interval = nodes.max(1);
        self
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Reads the clock and latches the stop flag once the deadline has passed.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && let Some(start) = self.start_time
            && start.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    /// True every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes.is_multiple_of(self.check_interval)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|s| s.elapsed()).unwrap_or(Duration::ZERO)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
