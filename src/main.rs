use std::process::ExitCode;
use std::sync::Arc;

use nsc_sidecar::{Config, LogWriter, Sidecar, Subscribe};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` selects levels (default `info`); `LOG_FORMAT=json` switches to
/// one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cfg = Config::from_env();
    tracing::info!(
        controller = %cfg.endpoint,
        pod = %cfg.pod.name,
        namespace = %cfg.pod.namespace,
        node = %cfg.pod.node_name,
        network_service = %cfg.pod.network_service,
        discovery = cfg.discovery,
        "starting nsc sidecar"
    );

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let sidecar = Sidecar::builder(cfg).with_subscribers(subs).build();

    match sidecar.run_until_signal().await {
        Ok(()) => {
            tracing::info!("nsc sidecar stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "nsc sidecar failed");
            ExitCode::FAILURE
        }
    }
}
