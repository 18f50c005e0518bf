//! # Restart policy between registration attempts.
//!
//! [`RestartPolicy`] turns the [`SessionOutcome`] of one attempt into a
//! [`RestartPlan`]: how long to wait before the next attempt and whether the
//! retry counter carried in the next `ProcessPod` request advances.
//!
//! ```text
//! Completed                        → cooldown (60s),      retry unchanged
//! Aborted(InterfaceLost)           → failure_delay (1s),  retry + 1
//! Aborted(RegistrationFailed)      → failure_delay (1s),  retry + 1
//! Aborted(IdentityUnavailable)     → failure_delay (1s),  retry unchanged
//! Aborted(DiscoveryFailed)         → failure_delay (1s),  retry unchanged
//! Aborted(ExternalTermination)     → no restart
//! ```

use std::time::Duration;

use crate::{core::SessionOutcome, error::SessionError, events::BackoffSource};

/// Delays applied between registration attempts.
#[derive(Clone, Copy, Debug)]
pub struct RestartPolicy {
    /// Wait after any failed or interrupted attempt.
    pub failure_delay: Duration,
    /// Wait after the controller ended a registration cleanly.
    pub cooldown: Duration,
}

impl Default for RestartPolicy {
    /// Returns `failure_delay = 1s`, `cooldown = 60s`.
    fn default() -> Self {
        Self {
            failure_delay: Duration::from_secs(1),
            cooldown: Duration::from_secs(60),
        }
    }
}

/// What to do before the next attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestartPlan {
    /// Sleep before the next attempt.
    pub delay: Duration,
    /// Whether the retry counter advances for the next request.
    pub advance_retry: bool,
    /// Whether the delay follows a clean completion or a failure.
    pub source: BackoffSource,
}

impl RestartPolicy {
    /// Returns the plan for the next attempt, or `None` when the loop must stop.
    pub fn plan(&self, outcome: &SessionOutcome) -> Option<RestartPlan> {
        let err = match outcome {
            SessionOutcome::Completed => {
                return Some(RestartPlan {
                    delay: self.cooldown,
                    advance_retry: false,
                    source: BackoffSource::Success,
                });
            }
            SessionOutcome::Aborted(err) => err,
        };

        if err.is_fatal() {
            return None;
        }

        let advance_retry = matches!(
            err,
            SessionError::InterfaceLost { .. } | SessionError::RegistrationFailed { .. }
        );
        Some(RestartPlan {
            delay: self.failure_delay,
            advance_retry,
            source: BackoffSource::Failure,
        })
    }
}
