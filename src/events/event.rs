//! # Events emitted by the registration session.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata
//! (attempt number, retry counter, endpoint, error text, delays).
//!
//! ## Ordering guarantees
//! Each event carries a process-wide sequence number (`seq`) that increases
//! monotonically, so subscribers can restore ordering.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use nsc_sidecar::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ConnectFailed)
//!     .with_endpoint("10.0.0.5:50051")
//!     .with_reason("connection refused")
//!     .with_delay(Duration::from_secs(1));
//!
//! assert_eq!(ev.kind, EventKind::ConnectFailed);
//! assert_eq!(ev.endpoint.as_deref(), Some("10.0.0.5:50051"));
//! assert_eq!(ev.delay_ms, Some(1000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Attempt lifecycle ===
    /// A new registration attempt begins.
    ///
    /// Sets: `attempt`, `retry`, `endpoint` (initial controller address)
    SessionStarting,

    /// One dial to a controller failed; the connector will retry.
    ///
    /// Sets: `endpoint`, `reason`, `delay_ms`
    ConnectFailed,

    /// A transport connection was established.
    ///
    /// Sets: `endpoint`
    Connected,

    /// The network namespace identity was computed.
    ///
    /// Sets: `detail` (inode URL)
    IdentityResolved,

    /// The discovery controller assigned an endpoint.
    ///
    /// Sets: `endpoint` (discovered address)
    Discovered,

    /// The `ProcessPod` call was issued and the monitor started.
    ///
    /// Sets: `attempt`, `retry`, `endpoint`
    RegistrationStarted,

    /// The controller ended the registration without error.
    ///
    /// Sets: `attempt`, `retry`
    RegistrationCompleted,

    /// The monitor found no managed interface.
    ///
    /// Sets: `detail` (prefix)
    InterfaceLost,

    /// The attempt ended with an error other than termination.
    ///
    /// Sets: `attempt`, `reason`, `detail` (error label)
    AttemptAborted,

    /// The next attempt has been scheduled.
    ///
    /// Sets: `attempt` (finished attempt), `retry` (next value), `delay_ms`,
    /// `backoff_source`
    BackoffScheduled,

    // === Process lifecycle ===
    /// A termination signal was observed; no further attempt will start.
    ///
    /// Sets: `attempt` (attempt in progress or last finished)
    ShutdownRequested,

    /// The outer loop exited.
    ///
    /// Sets: `attempt` (last attempt number)
    SidecarStopped,
}

/// Why the next attempt was delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffSource {
    /// The previous registration completed cleanly (long cooldown).
    Success,
    /// The previous attempt failed or was interrupted (short delay).
    Failure,
}

/// Session event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Process-wide, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Attempt number (starting from 1).
    pub attempt: Option<u32>,
    /// Retry counter carried in `ProcessPod` requests.
    pub retry: Option<u32>,
    /// Controller address involved, if any.
    pub endpoint: Option<Arc<str>>,
    /// Error text.
    pub reason: Option<Arc<str>>,
    /// Extra context (inode URL, interface prefix, error label).
    pub detail: Option<Arc<str>>,
    /// Delay before the next step in milliseconds.
    pub delay_ms: Option<u32>,
    /// Source of a scheduled restart delay.
    pub backoff_source: Option<BackoffSource>,
}

impl Event {
    /// Creates an event of the given kind stamped with the current time and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            attempt: None,
            retry: None,
            endpoint: None,
            reason: None,
            detail: None,
            delay_ms: None,
            backoff_source: None,
        }
    }

    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    #[inline]
    pub fn with_retry(mut self, n: u32) -> Self {
        self.retry = Some(n);
        self
    }

    #[inline]
    pub fn with_endpoint(mut self, endpoint: impl Into<Arc<str>>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[inline]
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attaches a delay (stored as milliseconds, saturating at `u32::MAX`).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay_ms = Some(d.as_millis().min(u128::from(u32::MAX)) as u32);
        self
    }

    #[inline]
    pub fn with_backoff_source(mut self, source: BackoffSource) -> Self {
        self.backoff_source = Some(source);
        self
    }
}
