//! # OS termination signals.
//!
//! [`ShutdownSignals`] installs the listeners up front so a registration
//! failure surfaces at start-up, then [`recv`](ShutdownSignals::recv) resolves
//! on the first signal.
//!
//! **Unix:** `SIGINT`, `SIGTERM` (Kubernetes pod deletion), `SIGQUIT`, `SIGHUP`.
//! **Other platforms:** Ctrl-C via [`tokio::signal::ctrl_c`].

use std::io;

/// Installed termination-signal listeners.
#[cfg(unix)]
pub struct ShutdownSignals {
    sigint: tokio::signal::unix::Signal,
    sigterm: tokio::signal::unix::Signal,
    sigquit: tokio::signal::unix::Signal,
    sighup: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    /// Installs listeners. Must be called from within a tokio runtime.
    pub fn register() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
            sigquit: signal(SignalKind::quit())?,
            sighup: signal(SignalKind::hangup())?,
        })
    }

    /// Waits for the first termination signal.
    pub async fn recv(&mut self) {
        tokio::select! {
            _ = self.sigint.recv()  => {},
            _ = self.sigterm.recv() => {},
            _ = self.sigquit.recv() => {},
            _ = self.sighup.recv()  => {},
        }
    }
}

/// Installed termination-signal listeners.
#[cfg(not(unix))]
pub struct ShutdownSignals;

#[cfg(not(unix))]
impl ShutdownSignals {
    pub fn register() -> io::Result<Self> {
        Ok(Self)
    }

    pub async fn recv(&mut self) {
        let _ = tokio::signal::ctrl_c().await;
    }
}
