use std::time::{Duration, Instant};

use crate::constants::{
    DEFAULT_MOVES_TO_GO, DEFAULT_PLAYER_INCREMENT_MS, DEFAULT_PLAYER_TIME_REMAINING_MS,
    SOFT_TO_HARD_LIMIT_RATIO,
};

#[derive(Debug, Clone, Copy)]
pub struct TimeManager {
    pub start_time: Instant,
    pub soft_limit: Duration,
    pub hard_limit: Duration,
    pub unlimited: bool,
}

/// For ease of use in tests
impl Default for TimeManager {
    fn default() -> Self {
        Self::infinite()
    }
}

impl TimeManager {
    /// No deadline; a fixed-depth search stops on depth alone.
    pub fn infinite() -> Self {
        Self {
            start_time: Instant::now(),
            soft_limit: Duration::MAX,
            hard_limit: Duration::MAX,
            unlimited: true,
        }
    }

    /// Explicit per-move budget: the whole budget is both limits.
    pub fn fixed(movetime_ms: u64) -> Self {
        Self {
            start_time: Instant::now(),
            soft_limit: Duration::from_millis(movetime_ms),
            hard_limit: Duration::from_millis(movetime_ms),
            unlimited: false,
        }
    }

    /// Clock-based budget: a slice of the remaining time plus half the
    /// increment, capped at 60% of what is left, with an aggressive
    /// fallback once the clock runs low. The soft limit gates starting
    /// another depth; the hard limit aborts the one in flight.
    pub fn from_clock(remaining_ms: Option<u64>, increment_ms: Option<u64>, moves_to_go: Option<u64>) -> Self {
        let remaining = remaining_ms.unwrap_or(DEFAULT_PLAYER_TIME_REMAINING_MS);
        let increment = increment_ms.unwrap_or(DEFAULT_PLAYER_INCREMENT_MS);
        let moves_to_go = match moves_to_go {
            Some(0) | None => DEFAULT_MOVES_TO_GO,
            Some(n) => n,
        };

        let mut think_ms = (remaining / moves_to_go + increment / 2).min(remaining * 60 / 100);

        if think_ms < 10 {
            think_ms = 10;
        }

        if remaining < 60_000 {
            think_ms = (remaining / 10).max(5);
        }

        let soft_ms = (think_ms as f64 * SOFT_TO_HARD_LIMIT_RATIO) as u64;

        Self {
            start_time: Instant::now(),
            soft_limit: Duration::from_millis(soft_ms),
            hard_limit: Duration::from_millis(think_ms),
            unlimited: false,
        }
    }

    /// Time since search began
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Check if we should skip starting the next iteration
    pub fn is_soft_limit_reached(&self) -> bool {
        !self.unlimited && self.elapsed() >= self.soft_limit
    }

    /// Check if we must abort immediately
    pub fn is_hard_limit_reached(&self) -> bool {
        !self.unlimited && self.elapsed() >= self.hard_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_never_stops() {
        let manager = TimeManager::infinite();
        assert!(!manager.is_soft_limit_reached());
        assert!(!manager.is_hard_limit_reached());
    }

    #[test]
    fn clock_allocation_caps_at_remaining_fraction() {
        let manager = TimeManager::from_clock(Some(120_000), Some(600_000), Some(30));
        // 120000/30 + 300000 would be absurd; the 60% cap holds it down
        assert!(manager.hard_limit <= Duration::from_millis(72_000));
    }

    #[test]
    fn low_clock_uses_fallback() {
        let manager = TimeManager::from_clock(Some(3_000), Some(0), Some(30));
        assert_eq!(manager.hard_limit, Duration::from_millis(300));
    }
}
