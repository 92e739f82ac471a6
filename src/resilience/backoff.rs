//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// Delay schedule for polling a remote job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub base: Duration,
    pub max: Duration,
}

impl Backoff {
    pub fn new(base_ms: u64, max_ms: u64) -> Self {
        Self {
            base: Duration::from_millis(base_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    /// Delay before the given attempt (1-based); attempt 0 waits nothing.
    ///
    /// `base * 2^(attempt-1)`, capped at `max`, plus up to 10% jitter.
    pub fn delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base_ms = self.base.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;

        let factor = 2u64.saturating_pow(attempt - 1);
        let capped = base_ms.saturating_mul(factor).min(max_ms);

        let jitter_range = capped / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(capped + jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_growth() {
        let backoff = Backoff::new(100, 2000);
        assert_eq!(backoff.delay(0), Duration::ZERO);

        let d1 = backoff.delay(1).as_millis();
        assert!((100..110).contains(&d1));

        let d2 = backoff.delay(2).as_millis();
        assert!((200..220).contains(&d2));
    }

    #[test]
    fn test_backoff_cap() {
        let backoff = Backoff::new(100, 1000);
        let capped = backoff.delay(10).as_millis();
        assert!((1000..1100).contains(&capped));

        // Huge attempt counts saturate instead of overflowing
        assert!(backoff.delay(200).as_millis() < 1100);
    }
}
