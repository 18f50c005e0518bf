//! # Registration session: the outer restart loop.
//!
//! One [`Session`] drives the pod through repeated registration attempts until
//! the shutdown token fires.
//!
//! ## Attempt
//! ```text
//! token = shutdown.child_token()
//!
//! connect(cfg.endpoint)                    (retries forever, cancellable)
//!   └─► resolve namespace identity         Err → IdentityUnavailable
//!        └─► [discovery]
//!             discover(node_name)          consumes and closes the connection
//!               Err / "" → DiscoveryFailed
//!             connect(discovered)          (retries forever, cancellable)
//!        └─► spawn monitor(token)          loss → publish InterfaceLost, token.cancel()
//!            ProcessPod(request)  ◄── raced against token
//!            token.cancel(); await monitor; close connection
//! ```
//!
//! ## Outcome priority
//! ```text
//! shutdown cancelled          → ExternalTermination
//! monitor reported loss       → InterfaceLost
//! ProcessPod Ok               → Completed
//! ProcessPod Err              → RegistrationFailed
//! ```
//!
//! ## Rules
//! - Attempts run strictly sequentially; the monitor of attempt `n` has
//!   exited before attempt `n + 1` starts.
//! - Every connection is closed before the next attempt starts.
//! - The retry counter only moves forward, and only as [`RestartPolicy::plan`]
//!   allows.
//!
//! [`RestartPolicy::plan`]: crate::RestartPolicy::plan

use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use super::{
    connector::connect,
    monitor::{MonitorExit, monitor},
    outcome::SessionOutcome,
};
use crate::{
    config::Config,
    controller::{Controller, ConnectorRef, discover},
    error::SessionError,
    events::{Bus, Event, EventKind},
    iface::InterfaceProbe,
    netns::NamespaceResolver,
    pod::RegistrationRequest,
};

/// Sequential registration loop with its collaborators.
pub struct Session {
    cfg: Config,
    bus: Bus,
    connector: ConnectorRef,
    resolver: Arc<dyn NamespaceResolver>,
    probe: Arc<dyn InterfaceProbe>,
}

impl Session {
    pub fn new(
        cfg: Config,
        bus: Bus,
        connector: ConnectorRef,
        resolver: Arc<dyn NamespaceResolver>,
        probe: Arc<dyn InterfaceProbe>,
    ) -> Self {
        Self {
            cfg,
            bus,
            connector,
            resolver,
            probe,
        }
    }

    /// Runs attempts until `shutdown` fires. Returns the number of attempts started.
    pub async fn run(&self, shutdown: &CancellationToken) -> u32 {
        let mut attempt: u32 = 0;
        let mut retry: u32 = 0;

        loop {
            if shutdown.is_cancelled() {
                self.bus
                    .publish(Event::new(EventKind::ShutdownRequested).with_attempt(attempt));
                break;
            }

            attempt = attempt.saturating_add(1);
            self.bus.publish(
                Event::new(EventKind::SessionStarting)
                    .with_attempt(attempt)
                    .with_retry(retry)
                    .with_endpoint(self.cfg.endpoint.address()),
            );

            let outcome = self.attempt(attempt, retry, shutdown).await;
            match &outcome {
                SessionOutcome::Aborted(err) if err.is_fatal() => {
                    self.bus
                        .publish(Event::new(EventKind::ShutdownRequested).with_attempt(attempt));
                }
                SessionOutcome::Aborted(err) => {
                    self.bus.publish(
                        Event::new(EventKind::AttemptAborted)
                            .with_attempt(attempt)
                            .with_reason(err.to_string())
                            .with_detail(err.as_label()),
                    );
                }
                SessionOutcome::Completed => {}
            }

            let Some(plan) = self.cfg.restart.plan(&outcome) else {
                break;
            };
            if plan.advance_retry {
                retry = retry.saturating_add(1);
            }
            self.bus.publish(
                Event::new(EventKind::BackoffScheduled)
                    .with_attempt(attempt)
                    .with_retry(retry)
                    .with_delay(plan.delay)
                    .with_backoff_source(plan.source),
            );

            select! {
                _ = time::sleep(plan.delay) => {}
                _ = shutdown.cancelled() => {
                    self.bus
                        .publish(Event::new(EventKind::ShutdownRequested).with_attempt(attempt));
                    break;
                }
            }
        }

        self.bus
            .publish(Event::new(EventKind::SidecarStopped).with_attempt(attempt));
        attempt
    }

    /// Runs one attempt from the first dial to the end of `ProcessPod`.
    async fn attempt(&self, attempt: u32, retry: u32, shutdown: &CancellationToken) -> SessionOutcome {
        let token = shutdown.child_token();
        let initial = self.cfg.endpoint.address();

        let Some(conn) = connect(
            self.connector.as_ref(),
            initial,
            &self.cfg.connect_backoff,
            &self.bus,
            &token,
        )
        .await
        else {
            return SessionOutcome::Aborted(SessionError::ExternalTermination);
        };

        let identity = match self.resolver.resolve() {
            Ok(identity) => identity,
            Err(err) => {
                drop(conn);
                return SessionOutcome::Aborted(err);
            }
        };
        self.bus
            .publish(Event::new(EventKind::IdentityResolved).with_detail(identity.as_str()));

        let (mut conn, endpoint) = if self.cfg.discovery {
            let discovered = select! {
                biased;
                _ = token.cancelled() => {
                    return SessionOutcome::Aborted(SessionError::ExternalTermination);
                }
                res = discover(conn, &self.cfg.pod.node_name) => res,
            };
            let endpoint = match discovered {
                Ok(endpoint) => endpoint,
                Err(err) => return SessionOutcome::Aborted(err),
            };
            self.bus
                .publish(Event::new(EventKind::Discovered).with_endpoint(endpoint.address()));

            match connect(
                self.connector.as_ref(),
                endpoint.address(),
                &self.cfg.connect_backoff,
                &self.bus,
                &token,
            )
            .await
            {
                Some(conn) => (conn, endpoint.address().to_string()),
                None => return SessionOutcome::Aborted(SessionError::ExternalTermination),
            }
        } else {
            (conn, initial.to_string())
        };

        let request = RegistrationRequest::new(&self.cfg.pod, identity, retry);
        let result = self
            .register(&mut *conn, &request, &endpoint, attempt, &token)
            .await;
        drop(conn);

        if shutdown.is_cancelled() {
            return SessionOutcome::Aborted(SessionError::ExternalTermination);
        }
        match result {
            Registration::Lost => SessionOutcome::Aborted(SessionError::InterfaceLost {
                prefix: self.cfg.interface_prefix.clone(),
            }),
            Registration::Returned(Ok(())) => {
                self.bus.publish(
                    Event::new(EventKind::RegistrationCompleted)
                        .with_attempt(attempt)
                        .with_retry(retry),
                );
                SessionOutcome::Completed
            }
            Registration::Returned(Err(err @ SessionError::RegistrationFailed { .. })) => {
                SessionOutcome::Aborted(err)
            }
            Registration::Returned(Err(other)) => {
                SessionOutcome::Aborted(SessionError::RegistrationFailed {
                    reason: other.to_string(),
                })
            }
            Registration::Cancelled => SessionOutcome::Aborted(SessionError::ExternalTermination),
        }
    }

    /// Issues `ProcessPod` with the interface monitor running beside it.
    ///
    /// The monitor has exited when this returns.
    async fn register(
        &self,
        conn: &mut dyn Controller,
        request: &RegistrationRequest,
        endpoint: &str,
        attempt: u32,
        token: &CancellationToken,
    ) -> Registration {
        let watcher = {
            let bus = self.bus.clone();
            let prefix = self.cfg.interface_prefix.clone();
            let on_loss_token = token.clone();
            let on_loss_prefix = prefix.clone();
            tokio::spawn(monitor(
                Arc::clone(&self.probe),
                prefix,
                self.cfg.monitor_interval,
                token.clone(),
                move || {
                    bus.publish(Event::new(EventKind::InterfaceLost).with_detail(on_loss_prefix));
                    on_loss_token.cancel();
                },
            ))
        };

        self.bus.publish(
            Event::new(EventKind::RegistrationStarted)
                .with_attempt(attempt)
                .with_retry(request.retry_count)
                .with_endpoint(endpoint),
        );

        let returned = select! {
            res = conn.process_pod(request) => Some(res),
            _ = token.cancelled() => None,
        };

        token.cancel();
        let exit = match watcher.await {
            Ok(exit) => exit,
            Err(err) => {
                tracing::error!(error = %err, "interface monitor task failed");
                MonitorExit::Cancelled
            }
        };

        match (exit, returned) {
            (MonitorExit::InterfaceLost, _) => Registration::Lost,
            (MonitorExit::Cancelled, Some(res)) => Registration::Returned(res),
            (MonitorExit::Cancelled, None) => Registration::Cancelled,
        }
    }
}

/// How the `ProcessPod` phase ended.
enum Registration {
    /// The monitor reported the interface gone.
    Lost,
    /// The call returned on its own.
    Returned(crate::error::Result<()>),
    /// The attempt token fired for another reason.
    Cancelled,
}
