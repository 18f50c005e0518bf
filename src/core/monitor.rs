//! # Interface presence monitor.
//!
//! Runs beside the blocking `ProcessPod` call for exactly one attempt.
//!
//! ```text
//! every interval (first tick one interval after start):
//!   ├─ cancel fired              ──► return Cancelled   (on_loss not called)
//!   ├─ has_interface(prefix)     ──► keep waiting
//!   └─ no matching interface     ──► on_loss(); return InterfaceLost
//! ```
//!
//! Loss is reported once; the monitor then exits and leaves the reaction to
//! the session.

use std::sync::Arc;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::iface::{InterfaceProbe, has_interface};

/// Why the monitor stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorExit {
    /// The attempt was cancelled before any loss was seen.
    Cancelled,
    /// A tick found no interface with the prefix.
    InterfaceLost,
}

/// Polls `probe` every `period` until `cancel` fires or the interface is gone.
///
/// `on_loss` is invoked at most once, and only on [`MonitorExit::InterfaceLost`].
pub async fn monitor<F>(
    probe: Arc<dyn InterfaceProbe>,
    prefix: String,
    period: Duration,
    cancel: CancellationToken,
    on_loss: F,
) -> MonitorExit
where
    F: FnOnce() + Send,
{
    let mut ticker = time::interval_at(time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

    loop {
        select! {
            biased;
            _ = cancel.cancelled() => return MonitorExit::Cancelled,
            _ = ticker.tick() => {
                if !has_interface(probe.as_ref(), &prefix) {
                    on_loss();
                    return MonitorExit::InterfaceLost;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    /// Reports `nsm0` until `gone_after`, then only `lo`; records check times.
    struct Vanishing {
        start: Instant,
        gone_after: Option<Duration>,
        checks: Mutex<Vec<Duration>>,
    }

    impl Vanishing {
        fn new(gone_after: Option<Duration>) -> Arc<Self> {
            Arc::new(Self {
                start: Instant::now(),
                gone_after,
                checks: Mutex::new(Vec::new()),
            })
        }
    }

    impl InterfaceProbe for Vanishing {
        fn interface_names(&self) -> io::Result<Vec<String>> {
            let now = self.start.elapsed();
            self.checks.lock().unwrap().push(now);
            let present = self.gone_after.is_none_or(|gone| now < gone);
            let mut names = vec!["lo".to_string()];
            if present {
                names.push("nsm0".to_string());
            }
            Ok(names)
        }
    }

    const TICK: Duration = Duration::from_secs(10);

    #[tokio::test(start_paused = true)]
    async fn test_missing_interface_fires_once_on_first_tick() {
        let probe = Vanishing::new(Some(Duration::ZERO));
        let fired = Arc::new(AtomicU32::new(0));
        let counter = fired.clone();
        let start = Instant::now();

        let exit = monitor(
            probe.clone(),
            "nsm".into(),
            TICK,
            CancellationToken::new(),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        )
        .await;

        assert_eq!(exit, MonitorExit::InterfaceLost);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() >= TICK);
        assert!(start.elapsed() < TICK + Duration::from_millis(100));

        // The monitor has returned: further ticks can no longer fire.
        time::sleep(TICK * 3).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(probe.checks.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loss_detected_on_tick_after_disappearance() {
        let probe = Vanishing::new(Some(Duration::from_secs(12)));
        let start = Instant::now();

        let exit = monitor(
            probe.clone(),
            "nsm".into(),
            TICK,
            CancellationToken::new(),
            || {},
        )
        .await;

        assert_eq!(exit, MonitorExit::InterfaceLost);
        assert_eq!(probe.checks.lock().unwrap().len(), 2);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(20), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(20_100), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_silently() {
        let probe = Vanishing::new(Some(Duration::ZERO));
        let cancel = CancellationToken::new();
        let fired = Arc::new(AtomicU32::new(0));
        let counter = fired.clone();

        let handle = tokio::spawn(monitor(
            probe.clone(),
            "nsm".into(),
            TICK,
            cancel.clone(),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        ));

        time::sleep(Duration::from_secs(5)).await;
        cancel.cancel();

        assert_eq!(handle.await.unwrap(), MonitorExit::Cancelled);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(probe.checks.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_present_interface_keeps_polling() {
        let probe = Vanishing::new(None);
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(monitor(
            probe.clone(),
            "nsm".into(),
            TICK,
            cancel.clone(),
            || panic!("interface is present"),
        ));

        time::sleep(Duration::from_secs(35)).await;
        cancel.cancel();

        assert_eq!(handle.await.unwrap(), MonitorExit::Cancelled);
        assert_eq!(probe.checks.lock().unwrap().len(), 3);
    }
}
