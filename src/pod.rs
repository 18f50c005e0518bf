//! # Pod-side data carried into registration.
//!
//! - [`PodIdentity`] who this pod is; read once from the environment.
//! - [`ControllerEndpoint`] which controller to dial.
//! - [`RegistrationRequest`] one `ProcessPod` request, built fresh per attempt.

use std::fmt;

use crate::netns::NamespaceIdentity;

/// Identity of the pod this sidecar runs in.
///
/// Immutable for the lifetime of the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PodIdentity {
    /// Pod name (`POD_NAME`).
    pub name: String,
    /// Pod namespace (`MY_POD_NAMESPACE`).
    pub namespace: String,
    /// Node the pod is scheduled on (`MY_NODE_NAME`).
    pub node_name: String,
    /// Network service the pod asks to join (`NSM_NETWORK_SERVICES`).
    pub network_service: String,
}

/// Address of a controller instance (`host:port` or a full URI).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ControllerEndpoint(String);

impl ControllerEndpoint {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn address(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControllerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `ProcessPod` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub pod: PodIdentity,
    pub identity: NamespaceIdentity,
    /// Number of earlier registrations of this process that failed or were interrupted.
    pub retry_count: u32,
}

impl RegistrationRequest {
    pub fn new(pod: &PodIdentity, identity: NamespaceIdentity, retry_count: u32) -> Self {
        Self {
            pod: pod.clone(),
            identity,
            retry_count,
        }
    }
}
