//! Provisioning orchestrator
//!
//! Entry point invoked once per declarative intent by the external task
//! dispatcher. Per operation: open a fresh authenticated session, run
//! the lifecycle transition, and emit one lifecycle event on success.
//! Event emission is best-effort telemetry; a sink failure is logged and
//! never unwinds the committed mutation.

use crate::lifecycle::{Lifecycle, RouterSpec, Selector};
use crate::resolver::Resolver;
use routegrid_core::{Connector, EventSink, LifecycleEvent, ResourceKind, Result, Router};
use std::sync::Arc;

pub struct Orchestrator {
    connector: Arc<dyn Connector>,
    events: Arc<dyn EventSink>,
}

impl Orchestrator {
    pub fn new(connector: Arc<dyn Connector>, events: Arc<dyn EventSink>) -> Self {
        Self { connector, events }
    }

    pub async fn provision(&self, spec: &RouterSpec) -> Result<Router> {
        let plane = self.connector.connect().await?;
        let router = Lifecycle::new(plane.as_ref()).provision(spec).await?;
        self.notify(LifecycleEvent::router_state(&router.id, &router.name, "running"))
            .await;
        Ok(router)
    }

    pub async fn add_gateway(
        &self,
        router_name: &str,
        network_name: &str,
        enable_snat: bool,
    ) -> Result<Router> {
        let plane = self.connector.connect().await?;
        let router = Lifecycle::new(plane.as_ref())
            .add_gateway(Selector::from(router_name), network_name, enable_snat)
            .await?;
        self.notify(LifecycleEvent::router_state(
            &router.id,
            &router.name,
            "gateway-attached",
        ))
        .await;
        Ok(router)
    }

    pub async fn connect_subnet(&self, router_name: &str, subnet_name: &str) -> Result<Router> {
        let plane = self.connector.connect().await?;
        let (router, _port) = Lifecycle::new(plane.as_ref())
            .connect_subnet(Selector::from(router_name), Selector::from(subnet_name))
            .await?;
        self.notify(LifecycleEvent::router_state(
            &router.id,
            &router.name,
            "subnet-connected",
        ))
        .await;
        Ok(router)
    }

    pub async fn disconnect_subnet(&self, router_name: &str, subnet_name: &str) -> Result<Router> {
        let plane = self.connector.connect().await?;
        let lifecycle = Lifecycle::new(plane.as_ref());
        // disconnect takes resolved objects; resolve both names first.
        let resolver = Resolver::new(plane.as_ref());
        let router = resolver
            .router(router_name)
            .await?
            .required(ResourceKind::Router, router_name)?;
        let subnet = resolver
            .subnet(subnet_name)
            .await?
            .required(ResourceKind::Subnet, subnet_name)?;
        lifecycle.disconnect_subnet(&router, &subnet).await?;
        self.notify(LifecycleEvent::router_state(
            &router.id,
            &router.name,
            "subnet-disconnected",
        ))
        .await;
        Ok(router)
    }

    pub async fn terminate(&self, router_name: &str) -> Result<Router> {
        let plane = self.connector.connect().await?;
        let router = Lifecycle::new(plane.as_ref())
            .terminate(Selector::from(router_name))
            .await?;
        self.notify(LifecycleEvent::router_state(
            &router.id,
            &router.name,
            "terminated",
        ))
        .await;
        Ok(router)
    }

    async fn notify(&self, event: LifecycleEvent) {
        if let Err(error) = self.events.emit(&event).await {
            tracing::warn!(
                subject = %event.subject_name,
                value = %event.value,
                %error,
                "lifecycle event emission failed"
            );
        }
    }
}
