use std::sync::Arc;

use crate::{
    config::Config,
    controller::{ConnectorRef, GrpcConnector},
    events::Bus,
    iface::{InterfaceProbe, SystemInterfaces},
    netns::{NamespaceResolver, ProcNamespace},
    subscribers::Subscribe,
};

use super::{session::Session, sidecar::Sidecar};

/// Builder for a [`Sidecar`] with replaceable collaborators.
///
/// Unset collaborators default to the real system:
/// [`GrpcConnector`], [`ProcNamespace`] and [`SystemInterfaces`].
pub struct SidecarBuilder {
    cfg: Config,
    connector: Option<ConnectorRef>,
    resolver: Option<Arc<dyn NamespaceResolver>>,
    probe: Option<Arc<dyn InterfaceProbe>>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SidecarBuilder {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            connector: None,
            resolver: None,
            probe: None,
            subscribers: Vec::new(),
        }
    }

    /// Replaces the transport used to reach controllers.
    pub fn with_connector(mut self, connector: ConnectorRef) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Replaces the network namespace resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn NamespaceResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Replaces the interface enumeration used by the monitor.
    pub fn with_probe(mut self, probe: Arc<dyn InterfaceProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive session events through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the sidecar. Does not touch the network or the runtime.
    pub fn build(self) -> Sidecar {
        let bus = Bus::new(self.cfg.bus_capacity);
        let connector = self
            .connector
            .unwrap_or_else(|| Arc::new(GrpcConnector::new()));
        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(ProcNamespace::default()));
        let probe = self.probe.unwrap_or_else(|| Arc::new(SystemInterfaces));

        let session = Session::new(self.cfg, bus.clone(), connector, resolver, probe);
        Sidecar::new_internal(bus, session, self.subscribers)
    }
}
