//! Retry and restart policies.
//!
//! ## Contents
//! - [`BackoffPolicy`] delay between failed controller dials (first / factor / max + jitter)
//! - [`JitterPolicy`]  randomization so co-located sidecars don't reconnect in lockstep
//! - [`RestartPolicy`] delay between registration attempts, and retry-counter bookkeeping
//!
//! ## Quick wiring
//! ```text
//! Config { connect_backoff: BackoffPolicy, restart: RestartPolicy, .. }
//!      └─► core::connector::connect uses backoff.next(failures) between dials
//!      └─► core::session loop uses restart.plan(&outcome) between attempts
//! ```

mod backoff;
mod jitter;
mod restart;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
pub use restart::{RestartPlan, RestartPolicy};
