//! In-memory stand-ins for the controller, the namespace and the interfaces.
#![allow(dead_code)]

use std::future;
use std::io;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use nsc_sidecar::{
    Config, Connector, Controller, ControllerEndpoint, Event, InterfaceProbe, NamespaceIdentity,
    NamespaceResolver, PodIdentity, RegistrationRequest, Result, SessionError, Subscribe,
};

pub const INITIAL: &str = "ctl.test:50052";
pub const ASSIGNED: &str = "10.0.0.5:50051";
pub const INODE: u64 = 4_026_531_992;

pub fn config() -> Config {
    let mut cfg = Config::default();
    cfg.endpoint = ControllerEndpoint::new(INITIAL);
    cfg.pod = PodIdentity {
        name: "iperf-client-0".into(),
        namespace: "iperf".into(),
        node_name: "worker-1".into(),
        network_service: "vl3-service".into(),
    };
    cfg
}

/// What `DiscoverServer` answers.
#[derive(Clone)]
pub enum Discovery {
    Address(&'static str),
    Fail(&'static str),
}

/// What `ProcessPod` does.
#[derive(Clone, Copy)]
pub enum PodReply {
    /// Never returns.
    Block,
    Ok,
    Fail(&'static str),
}

#[derive(Clone, Debug)]
pub struct Dial {
    pub at: Duration,
    pub address: String,
}

#[derive(Clone, Debug)]
pub struct Registration {
    pub at: Duration,
    pub address: String,
    pub request: RegistrationRequest,
}

/// Shared state of every fake controller connection.
pub struct Controllers {
    start: Instant,
    discovery: Discovery,
    pod: PodReply,
    refuse_first: u32,
    refused: AtomicU32,
    pub dials: Mutex<Vec<Dial>>,
    pub discoveries: Mutex<Vec<String>>,
    pub registrations: Mutex<Vec<Registration>>,
    pub open: AtomicUsize,
}

impl Controllers {
    pub fn new(discovery: Discovery, pod: PodReply) -> Arc<Self> {
        Self::refusing(discovery, pod, 0)
    }

    /// Like [`Controllers::new`], but the first `n` dials are refused.
    pub fn refusing(discovery: Discovery, pod: PodReply, n: u32) -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            discovery,
            pod,
            refuse_first: n,
            refused: AtomicU32::new(0),
            dials: Mutex::new(Vec::new()),
            discoveries: Mutex::new(Vec::new()),
            registrations: Mutex::new(Vec::new()),
            open: AtomicUsize::new(0),
        })
    }

    pub fn dials(&self) -> Vec<Dial> {
        self.dials.lock().unwrap().clone()
    }

    pub fn registrations(&self) -> Vec<Registration> {
        self.registrations.lock().unwrap().clone()
    }

    pub fn open_connections(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

pub struct FakeConnector(pub Arc<Controllers>);

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, address: &str) -> Result<Box<dyn Controller>> {
        let world = &self.0;
        world.dials.lock().unwrap().push(Dial {
            at: world.start.elapsed(),
            address: address.to_string(),
        });

        if world.refused.load(Ordering::SeqCst) < world.refuse_first {
            world.refused.fetch_add(1, Ordering::SeqCst);
            return Err(SessionError::TransportUnavailable {
                address: address.to_string(),
                reason: "connection refused".into(),
            });
        }

        world.open.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeController {
            world: Arc::clone(world),
            address: address.to_string(),
        }))
    }
}

struct FakeController {
    world: Arc<Controllers>,
    address: String,
}

impl Drop for FakeController {
    fn drop(&mut self) {
        self.world.open.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Controller for FakeController {
    async fn discover_server(&mut self, node_name: &str) -> Result<String> {
        self.world
            .discoveries
            .lock()
            .unwrap()
            .push(node_name.to_string());
        match &self.world.discovery {
            Discovery::Address(addr) => Ok(addr.to_string()),
            Discovery::Fail(reason) => Err(SessionError::DiscoveryFailed {
                reason: reason.to_string(),
            }),
        }
    }

    async fn process_pod(&mut self, request: &RegistrationRequest) -> Result<()> {
        self.world.registrations.lock().unwrap().push(Registration {
            at: self.world.start.elapsed(),
            address: self.address.clone(),
            request: request.clone(),
        });
        match self.world.pod {
            PodReply::Block => future::pending().await,
            PodReply::Ok => Ok(()),
            PodReply::Fail(reason) => Err(SessionError::RegistrationFailed {
                reason: reason.to_string(),
            }),
        }
    }
}

/// Shows `nsm0` for `present_for` after creation; `None` keeps it forever.
pub struct FakeInterfaces {
    start: Instant,
    present_for: Option<Duration>,
    pub checks: AtomicU32,
}

impl FakeInterfaces {
    pub fn present_for(d: Duration) -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            present_for: Some(d),
            checks: AtomicU32::new(0),
        })
    }

    pub fn always() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            present_for: None,
            checks: AtomicU32::new(0),
        })
    }

    pub fn never() -> Arc<Self> {
        Self::present_for(Duration::ZERO)
    }
}

impl InterfaceProbe for FakeInterfaces {
    fn interface_names(&self) -> io::Result<Vec<String>> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        let mut names = vec!["lo".to_string(), "eth0".to_string()];
        if self.present_for.is_none_or(|d| self.start.elapsed() < d) {
            names.push("nsm0".to_string());
        }
        Ok(names)
    }
}

pub struct FakeNamespace {
    pub fail: bool,
    pub calls: AtomicU32,
}

impl FakeNamespace {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: AtomicU32::new(0),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: AtomicU32::new(0),
        })
    }
}

impl NamespaceResolver for FakeNamespace {
    fn resolve(&self) -> Result<NamespaceIdentity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SessionError::IdentityUnavailable {
                reason: "open /proc/self/ns/net: permission denied".into(),
            });
        }
        Ok(NamespaceIdentity::from_inode(INODE))
    }
}

/// Subscriber keeping every event it sees.
#[derive(Default)]
pub struct Collector {
    pub events: Mutex<Vec<Event>>,
}

#[async_trait]
impl Subscribe for Collector {
    async fn on_event(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "collector"
    }

    fn queue_capacity(&self) -> usize {
        1024
    }
}

/// Asserts `d` lies in `[secs, secs + 100ms)`.
pub fn assert_near(d: Duration, secs: u64) {
    let low = Duration::from_secs(secs);
    assert!(d >= low && d < low + Duration::from_millis(100), "{d:?} not near {secs}s");
}
