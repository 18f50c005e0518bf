//! # LogWriter: renders session events through `tracing`.
//!
//! ## Example output (`tracing-subscriber` compact format)
//! ```text
//! INFO  attempt starting attempt=1 retry=0 endpoint="cmd-nsc-grpc-server...:50052"
//! WARN  controller dial failed endpoint="10.0.0.5:50051" err="transport error" retry_in_ms=1000
//! INFO  discovered controller endpoint="10.0.0.5:50051"
//! INFO  registration started attempt=1 retry=0 endpoint="10.0.0.5:50051"
//! WARN  managed interface missing, reconnecting prefix="nsm"
//! INFO  next attempt scheduled after=Failure delay_ms=1000 retry=1
//! ```

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Subscriber that logs every session event.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let endpoint = e.endpoint.as_deref().unwrap_or_default();
        let reason = e.reason.as_deref().unwrap_or_default();
        let detail = e.detail.as_deref().unwrap_or_default();

        match e.kind {
            EventKind::SessionStarting => {
                info!(attempt = e.attempt, retry = e.retry, endpoint, "attempt starting");
            }
            EventKind::ConnectFailed => {
                warn!(endpoint, err = reason, retry_in_ms = e.delay_ms, "controller dial failed");
            }
            EventKind::Connected => {
                debug!(endpoint, "connected");
            }
            EventKind::IdentityResolved => {
                debug!(identity = detail, "network namespace identified");
            }
            EventKind::Discovered => {
                info!(endpoint, "discovered controller");
            }
            EventKind::RegistrationStarted => {
                info!(attempt = e.attempt, retry = e.retry, endpoint, "registration started");
            }
            EventKind::RegistrationCompleted => {
                info!(attempt = e.attempt, retry = e.retry, "registration completed");
            }
            EventKind::InterfaceLost => {
                warn!(prefix = detail, "managed interface missing, reconnecting");
            }
            EventKind::AttemptAborted => {
                error!(attempt = e.attempt, kind = detail, err = reason, "attempt aborted");
            }
            EventKind::BackoffScheduled => {
                info!(
                    after = ?e.backoff_source,
                    delay_ms = e.delay_ms,
                    retry = e.retry,
                    "next attempt scheduled"
                );
            }
            EventKind::ShutdownRequested => {
                info!(attempt = e.attempt, "shutdown requested");
            }
            EventKind::SidecarStopped => {
                info!(attempts = e.attempt, "sidecar stopped");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
