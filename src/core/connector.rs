//! # Retrying, cancellable controller dial.
//!
//! ```text
//! loop {
//!   ├─► connector.connect(addr)        (raced against cancel)
//!   │     ├─ Ok  ──► publish Connected, return conn
//!   │     └─ Err ──► delay = backoff.next(failures)
//!   │                publish ConnectFailed{ delay }
//!   │                sleep(delay)      (raced against cancel)
//!   └─ cancel fired ──► return None
//! }
//! ```
//!
//! Dial failures never reach the session: the only way out without a
//! connection is cancellation of the shutdown scope.

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::{
    controller::{Connector, Controller},
    events::{Bus, Event, EventKind},
    policies::BackoffPolicy,
};

/// Dials `address` until it succeeds or `cancel` fires.
pub async fn connect(
    connector: &dyn Connector,
    address: &str,
    backoff: &BackoffPolicy,
    bus: &Bus,
    cancel: &CancellationToken,
) -> Option<Box<dyn Controller>> {
    let mut failures: u32 = 0;

    loop {
        let res = select! {
            res = connector.connect(address) => res,
            _ = cancel.cancelled() => return None,
        };

        match res {
            Ok(conn) => {
                bus.publish(Event::new(EventKind::Connected).with_endpoint(address));
                return Some(conn);
            }
            Err(err) => {
                let delay = backoff.next(failures);
                failures = failures.saturating_add(1);
                bus.publish(
                    Event::new(EventKind::ConnectFailed)
                        .with_endpoint(address)
                        .with_reason(err.to_string())
                        .with_delay(delay),
                );

                select! {
                    _ = time::sleep(delay) => {}
                    _ = cancel.cancelled() => return None,
                }
            }
        }
    }
}
