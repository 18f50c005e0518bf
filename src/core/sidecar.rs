//! # Sidecar: process-level owner of the session.
//!
//! The [`Sidecar`] wires the event bus to subscribers, runs the registration
//! [`Session`] and turns OS signals into cancellation.
//!
//! ## High-level architecture
//! ```text
//! ShutdownSignals ──► shutdown token ──► Session::run()
//!                                            │ publish
//!                                            ▼
//!                                           Bus ──► listener ──► SubscriberSet ──► LogWriter, ...
//! ```
//!
//! ## Shutdown
//! - The first SIGINT/SIGTERM/SIGQUIT/SIGHUP cancels the shutdown token.
//! - An in-flight dial, discovery, `ProcessPod` call or backoff sleep is
//!   abandoned; its connection is closed.
//! - After the session returns, the listener drains the bus and the
//!   subscriber workers finish their queues before `run` returns.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;

use super::{builder::SidecarBuilder, session::Session, shutdown::ShutdownSignals};
use crate::{
    config::Config,
    error::SessionError,
    events::{Bus, Event},
    subscribers::{Subscribe, SubscriberSet},
};

/// Registers this pod with the controller until terminated.
pub struct Sidecar {
    bus: Bus,
    session: Session,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl Sidecar {
    /// Starts building a sidecar for `cfg`.
    pub fn builder(cfg: Config) -> SidecarBuilder {
        SidecarBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        bus: Bus,
        session: Session,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        Self {
            bus,
            session,
            subscribers,
        }
    }

    /// Returns a receiver for session events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Runs the session until `shutdown` is cancelled.
    ///
    /// Returns after the session loop has stopped and every subscriber has
    /// processed its queued events.
    pub async fn run(self, shutdown: CancellationToken) {
        let Self {
            bus,
            session,
            subscribers,
        } = self;

        let listener = {
            let mut rx = bus.subscribe();
            let set = SubscriberSet::new(subscribers);
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(ev) => set.emit(&ev),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "event listener lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
                set.shutdown().await;
            })
        };

        let attempts = session.run(&shutdown).await;
        tracing::debug!(attempts, "session loop finished");

        // The session holds the last publisher besides `bus`.
        drop(session);
        drop(bus);
        if let Err(err) = listener.await {
            tracing::error!(error = %err, "event listener task failed");
        }
    }

    /// Installs OS signal handlers and runs until the first termination signal.
    ///
    /// # Errors
    /// [`SessionError::SignalRegistration`] if the handlers cannot be installed.
    pub async fn run_until_signal(self) -> Result<(), SessionError> {
        let mut signals = ShutdownSignals::register().map_err(SessionError::SignalRegistration)?;
        let shutdown = CancellationToken::new();

        let trigger = shutdown.clone();
        let waiter = tokio::spawn(async move {
            tokio::select! {
                _ = signals.recv() => {
                    tracing::info!("termination signal received");
                    trigger.cancel();
                }
                _ = trigger.cancelled() => {}
            }
        });

        self.run(shutdown.clone()).await;
        shutdown.cancel();
        let _ = waiter.await;
        Ok(())
    }
}
