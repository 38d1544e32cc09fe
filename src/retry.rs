//! Backoff schedule between retry attempts.

use rand::Rng;
use std::time::Duration;

/// Exponential backoff between attempts of a single call.
///
/// The delay before attempt index `n` (0-based, so `n = 1` is the first retry)
/// is `initial_delay * 2^(n-1)`, capped at `max_delay`. The first attempt
/// never waits.
///
/// # Examples
///
/// ```
/// use srcom::Backoff;
/// use std::time::Duration;
///
/// let backoff = Backoff::default();
/// assert_eq!(backoff.delay_for_attempt(0), Duration::ZERO);
/// assert_eq!(backoff.delay_for_attempt(1), Duration::from_secs(1));
/// assert_eq!(backoff.delay_for_attempt(2), Duration::from_secs(2));
/// assert_eq!(backoff.delay_for_attempt(3), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    /// The delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Scale each delay by a random factor in `[0.5, 1.0]`.
    pub jitter: bool,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            jitter: false,
        }
    }
}

impl Backoff {
    /// Creates a backoff with the given initial delay and no jitter.
    pub fn exponential(initial_delay: Duration) -> Self {
        Self {
            initial_delay,
            ..Self::default()
        }
    }

    /// Returns the delay to wait before attempt index `attempt`.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = u32::try_from(attempt - 1).unwrap_or(u32::MAX);
        let multiplier = 2u32.saturating_pow(exponent);
        let delay = self
            .initial_delay
            .saturating_mul(multiplier)
            .min(self.max_delay);

        if self.jitter {
            let factor = rand::thread_rng().gen_range(0.5..=1.0);
            delay.mul_f64(factor)
        } else {
            delay
        }
    }
}
