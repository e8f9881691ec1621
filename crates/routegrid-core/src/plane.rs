//! Control-plane abstraction trait
//!
//! The narrow interface the engine consumes. All state lives behind this
//! trait in the remote store; implementations must not cache listings
//! across calls.

use crate::error::RemoteResult;
use crate::model::{ExternalGatewayInfo, Network, Port, Router, RouterCreate, Subnet};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote control-plane primitives.
///
/// Listing calls take an optional exact-match name filter; implementations
/// that cannot filter server-side may return supersets, the caller
/// re-filters. Mutations fail with [`crate::RemoteError`] kinds that the
/// engine translates into its own taxonomy.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn list_routers(&self, name: Option<&str>) -> RemoteResult<Vec<Router>>;

    async fn list_networks(&self, name: Option<&str>) -> RemoteResult<Vec<Network>>;

    async fn list_subnets(&self, name: Option<&str>) -> RemoteResult<Vec<Subnet>>;

    /// List ports, optionally restricted to one owning device (router).
    async fn list_ports(&self, device_id: Option<&str>) -> RemoteResult<Vec<Port>>;

    async fn create_router(&self, request: &RouterCreate) -> RemoteResult<Router>;

    /// Delete a router. Fails with `Conflict` while interface attachments
    /// remain; this system does not cascade-detach.
    async fn delete_router(&self, router_id: &str) -> RemoteResult<()>;

    /// Set (or replace) the router's external gateway. Idempotent at the
    /// control-plane level; duplicate calls are not suppressed here.
    async fn set_gateway(
        &self,
        router_id: &str,
        gateway: &ExternalGatewayInfo,
    ) -> RemoteResult<Router>;

    /// Create an interface attachment binding the subnet's network to the
    /// router. Returns the resulting port.
    async fn attach_interface(&self, router_id: &str, subnet_id: &str) -> RemoteResult<Port>;

    /// Remove the interface attachment between router and subnet. Fails
    /// with `NotFound` when no such attachment exists.
    async fn detach_interface(&self, router_id: &str, subnet_id: &str) -> RemoteResult<()>;
}

/// Session factory: one authenticated control-plane handle per operation.
///
/// Token acquisition happens inside `connect`; the returned handle is
/// treated as valid for the duration of a single operation and is never
/// refreshed mid-operation.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> RemoteResult<Arc<dyn ControlPlane>>;
}
