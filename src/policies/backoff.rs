//! # Delay policy for controller connect retries.
//!
//! [`BackoffPolicy`] computes how long the connector waits after the `n`-th
//! consecutive failed dial. The default is a flat one second with no jitter,
//! which keeps a sidecar polling its controller at a steady, low rate.
//!
//! The delay for failure `n` is `first × factor^n`, clamped to `max`, then
//! jittered. The base is derived from `n` alone, so jitter never compounds.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use nsc_sidecar::{BackoffPolicy, JitterPolicy};
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_millis(250),
//!     max: Duration::from_secs(2),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//! };
//!
//! assert_eq!(backoff.next(0), Duration::from_millis(250));
//! assert_eq!(backoff.next(2), Duration::from_secs(1));
//! assert_eq!(backoff.next(8), Duration::from_secs(2));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Retry delay policy for the controller connector.
#[derive(Clone, Copy, Debug)]
pub struct BackoffPolicy {
    /// Delay after the first failed dial.
    pub first: Duration,
    /// Upper bound for any single delay.
    pub max: Duration,
    /// Multiplicative growth factor (`1.0` = constant).
    pub factor: f64,
    /// Randomization applied to the clamped delay.
    pub jitter: JitterPolicy,
}

impl Default for BackoffPolicy {
    /// Returns a constant one-second policy:
    /// - `first = 1s`;
    /// - `factor = 1.0`;
    /// - `max = 1s`;
    /// - `jitter = None`.
    fn default() -> Self {
        Self {
            first: Duration::from_secs(1),
            max: Duration::from_secs(1),
            factor: 1.0,
            jitter: JitterPolicy::None,
        }
    }
}

impl BackoffPolicy {
    /// Computes the delay after `failures` previous consecutive failures (0-indexed).
    pub fn next(&self, failures: u32) -> Duration {
        let exp = failures.min(i32::MAX as u32) as i32;
        let secs = self.first.as_secs_f64() * self.factor.powi(exp);

        let base = if !secs.is_finite() || secs < 0.0 || secs > self.max.as_secs_f64() {
            self.max
        } else {
            Duration::from_secs_f64(secs)
        };

        match self.jitter {
            JitterPolicy::Decorrelated => {
                self.jitter
                    .apply_decorrelated(self.first.min(self.max), base, self.max)
            }
            _ => self.jitter.apply(base),
        }
    }
}
