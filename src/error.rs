//! Error types used by the registration session.
//!
//! [`SessionError`] is the single taxonomy for everything that can end one
//! registration attempt. Only [`SessionError::ExternalTermination`] (and the
//! related signal-registration failure) stops the outer loop; every other
//! variant is recovered by restarting the session.
//!
//! Like the rest of the crate, variants provide `as_label` for logs and
//! [`SessionError::is_fatal`] to tell restartable conditions apart.

use thiserror::Error;

/// Convenience alias for results carrying a [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;

/// # Errors that end a registration attempt.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SessionError {
    /// A transport connection to the controller could not be established.
    ///
    /// Retried inside the connector; never ends an attempt on its own.
    #[error("controller {address} unavailable: {reason}")]
    TransportUnavailable {
        /// Address that was dialed.
        address: String,
        /// Underlying transport error.
        reason: String,
    },

    /// The current network namespace could not be identified.
    #[error("network namespace identity unavailable: {reason}")]
    IdentityUnavailable {
        /// Why the namespace handle or its inode could not be read.
        reason: String,
    },

    /// The discovery controller failed or returned no assignment.
    #[error("controller discovery failed: {reason}")]
    DiscoveryFailed {
        /// Remote error or "empty server address".
        reason: String,
    },

    /// The long-lived `ProcessPod` call returned an error.
    #[error("pod registration failed: {reason}")]
    RegistrationFailed {
        /// Status message returned by the controller.
        reason: String,
    },

    /// No interface with the managed prefix is present any more.
    #[error("no interface with prefix {prefix:?} present")]
    InterfaceLost {
        /// The prefix that was looked for.
        prefix: String,
    },

    /// The process received a termination or interrupt signal.
    #[error("external termination requested")]
    ExternalTermination,

    /// OS signal handlers could not be installed.
    #[error("failed to register signal handlers: {0}")]
    SignalRegistration(#[source] std::io::Error),
}

impl SessionError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use nsc_sidecar::SessionError;
    ///
    /// let err = SessionError::DiscoveryFailed { reason: "empty server address".into() };
    /// assert_eq!(err.as_label(), "discovery_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SessionError::TransportUnavailable { .. } => "transport_unavailable",
            SessionError::IdentityUnavailable { .. } => "identity_unavailable",
            SessionError::DiscoveryFailed { .. } => "discovery_failed",
            SessionError::RegistrationFailed { .. } => "registration_failed",
            SessionError::InterfaceLost { .. } => "interface_lost",
            SessionError::ExternalTermination => "external_termination",
            SessionError::SignalRegistration(_) => "signal_registration",
        }
    }

    /// Indicates whether the condition ends the process loop.
    ///
    /// # Example
    /// ```
    /// use nsc_sidecar::SessionError;
    ///
    /// assert!(SessionError::ExternalTermination.is_fatal());
    /// assert!(!SessionError::InterfaceLost { prefix: "nsm".into() }.is_fatal());
    /// ```
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SessionError::ExternalTermination | SessionError::SignalRegistration(_)
        )
    }
}
