//! # Jitter for connect retry delays.
//!
//! Many sidecars on one node lose their controller at the same moment (a
//! controller restart, a node-wide network blip). [`JitterPolicy`] spreads
//! their reconnects so they do not dial in lockstep.

use rand::Rng;
use std::time::Duration;

/// Randomization strategy applied to a computed backoff delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// Use the delay unchanged.
    #[default]
    None,
    /// Uniform in `[0, delay]`.
    Full,
    /// `delay/2 + uniform[0, delay/2]`.
    Equal,
    /// Uniform in `[base, prev × 3]`, capped at `max`.
    ///
    /// Needs extra context; see [`apply_decorrelated`](Self::apply_decorrelated).
    Decorrelated,
}

impl JitterPolicy {
    /// Applies jitter to `delay`.
    ///
    /// `Decorrelated` returns `delay` unchanged here.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None | JitterPolicy::Decorrelated => delay,
            JitterPolicy::Full => full(delay),
            JitterPolicy::Equal => equal(delay),
        }
    }

    /// Applies decorrelated jitter given the floor, previous delay and cap.
    ///
    /// Other variants fall back to [`apply`](Self::apply) on `prev`.
    pub fn apply_decorrelated(&self, base: Duration, prev: Duration, max: Duration) -> Duration {
        if !matches!(self, JitterPolicy::Decorrelated) {
            return self.apply(prev);
        }

        let base_ms = base.as_millis() as u64;
        let upper = (prev.as_millis() as u64)
            .saturating_mul(3)
            .min(max.as_millis() as u64)
            .max(base_ms);

        if base_ms >= upper {
            return base;
        }
        Duration::from_millis(rand::rng().random_range(base_ms..=upper))
    }
}

fn full(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    if ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=ms))
}

fn equal(delay: Duration) -> Duration {
    let ms = delay.as_millis() as u64;
    let half = ms / 2;
    if half == 0 {
        return delay;
    }
    Duration::from_millis(half + rand::rng().random_range(0..=half))
}
