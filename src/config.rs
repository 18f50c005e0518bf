//! # Sidecar configuration.
//!
//! [`Config`] gathers the pod identity, the initial controller endpoint and
//! every timing knob of the session. [`Config::from_env`] reads the pod's
//! downward-API environment once at start-up:
//!
//! | Variable               | Field                     | Default |
//! |------------------------|---------------------------|---------|
//! | `NSC_GRPC_SERVER_ADDR` | `endpoint`                | [`DEFAULT_CONTROLLER_ADDR`] |
//! | `POD_NAME`             | `pod.name`                | `""`    |
//! | `MY_POD_NAMESPACE`     | `pod.namespace`           | `""`    |
//! | `MY_NODE_NAME`         | `pod.node_name`           | `""`    |
//! | `NSM_NETWORK_SERVICES` | `pod.network_service`     | `""`    |
//! | `NSC_DISCOVERY`        | `discovery`               | `true`  |
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use nsc_sidecar::{Config, ControllerEndpoint};
//!
//! let mut cfg = Config::default();
//! cfg.endpoint = ControllerEndpoint::new("ctl.example:50052");
//! cfg.monitor_interval = Duration::from_secs(5);
//!
//! assert_eq!(cfg.interface_prefix, "nsm");
//! assert!(cfg.discovery);
//! ```

use std::time::Duration;

use crate::{
    pod::{ControllerEndpoint, PodIdentity},
    policies::{BackoffPolicy, RestartPolicy},
};

/// Controller dialled when `NSC_GRPC_SERVER_ADDR` is unset or empty.
pub const DEFAULT_CONTROLLER_ADDR: &str =
    "cmd-nsc-grpc-server.kubeslice-system.svc.cluster.local:50052";

/// Name prefix of the interface the controller plumbs into the pod.
pub const DEFAULT_INTERFACE_PREFIX: &str = "nsm";

pub const ENV_CONTROLLER_ADDR: &str = "NSC_GRPC_SERVER_ADDR";
pub const ENV_POD_NAME: &str = "POD_NAME";
pub const ENV_POD_NAMESPACE: &str = "MY_POD_NAMESPACE";
pub const ENV_NODE_NAME: &str = "MY_NODE_NAME";
pub const ENV_NETWORK_SERVICE: &str = "NSM_NETWORK_SERVICES";
pub const ENV_DISCOVERY: &str = "NSC_DISCOVERY";

/// Configuration for one sidecar process.
#[derive(Clone, Debug)]
pub struct Config {
    /// Controller dialled at the start of every attempt.
    pub endpoint: ControllerEndpoint,
    /// Identity sent with every registration.
    pub pod: PodIdentity,
    /// Ask `endpoint` for the real controller before registering.
    ///
    /// When `false`, the pod registers directly with `endpoint`.
    pub discovery: bool,
    /// Prefix identifying the managed virtual interface.
    pub interface_prefix: String,
    /// Period between interface presence checks.
    pub monitor_interval: Duration,
    /// Delay between failed controller dials.
    pub connect_backoff: BackoffPolicy,
    /// Delays between registration attempts.
    pub restart: RestartPolicy,
    /// Capacity of the event bus ring buffer (min 1).
    pub bus_capacity: usize,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `endpoint = DEFAULT_CONTROLLER_ADDR`, `pod` empty
    /// - `discovery = true`
    /// - `interface_prefix = "nsm"`, `monitor_interval = 10s`
    /// - `connect_backoff` = constant 1s, `restart` = 1s / 60s
    /// - `bus_capacity = 256`
    fn default() -> Self {
        Self {
            endpoint: ControllerEndpoint::new(DEFAULT_CONTROLLER_ADDR),
            pod: PodIdentity::default(),
            discovery: true,
            interface_prefix: DEFAULT_INTERFACE_PREFIX.to_string(),
            monitor_interval: Duration::from_secs(10),
            connect_backoff: BackoffPolicy::default(),
            restart: RestartPolicy::default(),
            bus_capacity: 256,
        }
    }
}

impl Config {
    /// Builds a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();

        let mut cfg = Self::default();
        if let Some(addr) = lookup(ENV_CONTROLLER_ADDR).filter(|a| !a.trim().is_empty()) {
            cfg.endpoint = ControllerEndpoint::new(addr.trim());
        }
        cfg.pod = PodIdentity {
            name: var(ENV_POD_NAME),
            namespace: var(ENV_POD_NAMESPACE),
            node_name: var(ENV_NODE_NAME),
            network_service: var(ENV_NETWORK_SERVICE),
        };
        if let Some(flag) = lookup(ENV_DISCOVERY) {
            cfg.discovery = parse_flag(&flag).unwrap_or(cfg.discovery);
        }
        cfg
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_reads_pod_identity() {
        let cfg = Config::from_lookup(lookup(&[
            (ENV_POD_NAME, "iperf-client-0"),
            (ENV_POD_NAMESPACE, "iperf"),
            (ENV_NODE_NAME, "worker-1"),
            (ENV_NETWORK_SERVICE, "vl3-service"),
        ]));
        assert_eq!(cfg.pod.name, "iperf-client-0");
        assert_eq!(cfg.pod.namespace, "iperf");
        assert_eq!(cfg.pod.node_name, "worker-1");
        assert_eq!(cfg.pod.network_service, "vl3-service");
        assert_eq!(cfg.endpoint.address(), DEFAULT_CONTROLLER_ADDR);
    }

    #[test]
    fn test_address_override() {
        let cfg = Config::from_lookup(lookup(&[(ENV_CONTROLLER_ADDR, " 10.0.0.1:50052 ")]));
        assert_eq!(cfg.endpoint.address(), "10.0.0.1:50052");
    }

    #[test]
    fn test_empty_address_falls_back_to_default() {
        let cfg = Config::from_lookup(lookup(&[(ENV_CONTROLLER_ADDR, "")]));
        assert_eq!(cfg.endpoint.address(), DEFAULT_CONTROLLER_ADDR);
    }

    #[test]
    fn test_discovery_flag() {
        assert!(!Config::from_lookup(lookup(&[(ENV_DISCOVERY, "false")])).discovery);
        assert!(Config::from_lookup(lookup(&[(ENV_DISCOVERY, "ON")])).discovery);
        assert!(Config::from_lookup(lookup(&[(ENV_DISCOVERY, "maybe")])).discovery);
    }
}
