//! Router lifecycle operations
//!
//! Each operation is a guarded state transition: re-resolve the names it
//! touches, check the precondition, perform exactly one control-plane
//! mutation. Nothing is cached between operations; the remote store is
//! the source of truth and the final arbiter of the read-then-mutate
//! race (a losing `provision` caller sees the duplicate on its next
//! resolve, not a local lock).

use crate::resolver::{Resolution, Resolver};
use routegrid_core::{
    ControlPlane, ExternalGatewayInfo, Port, ProvisionError, RemoteError, ResourceKind, Result,
    Router, RouterCreate, Subnet,
};

/// Declarative intent for one router.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterSpec {
    pub name: String,
    pub gateway: Option<GatewaySpec>,
}

impl RouterSpec {
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gateway: None,
        }
    }

    pub fn with_gateway(name: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gateway: Some(GatewaySpec::new(network)),
        }
    }
}

/// Gateway intent: the external network by name, plus source NAT.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySpec {
    pub network: String,
    pub enable_snat: bool,
}

impl GatewaySpec {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            enable_snat: true,
        }
    }

    pub fn snat(mut self, enable: bool) -> Self {
        self.enable_snat = enable;
        self
    }
}

/// A name still to be resolved, or an object a previous step already
/// resolved. Both call shapes occur in practice: dispatcher payloads
/// carry names, composite flows carry the objects they just created.
#[derive(Debug, Clone)]
pub enum Selector<T> {
    Name(String),
    Object(T),
}

impl<T> From<&str> for Selector<T> {
    fn from(name: &str) -> Self {
        Selector::Name(name.to_string())
    }
}

impl From<Router> for Selector<Router> {
    fn from(router: Router) -> Self {
        Selector::Object(router)
    }
}

impl From<Subnet> for Selector<Subnet> {
    fn from(subnet: Subnet) -> Self {
        Selector::Object(subnet)
    }
}

/// Lifecycle transitions over one control-plane session.
pub struct Lifecycle<'a> {
    plane: &'a dyn ControlPlane,
    resolver: Resolver<'a>,
}

impl<'a> Lifecycle<'a> {
    pub fn new(plane: &'a dyn ControlPlane) -> Self {
        Self {
            plane,
            resolver: Resolver::new(plane),
        }
    }

    /// Create a router, optionally gateway-attached at creation time.
    ///
    /// Not idempotent: a second call with the same name fails with
    /// `AlreadyExists`, even if the existing router matches the spec.
    /// The name-uniqueness invariant is enforced here because the remote
    /// store does not enforce it.
    pub async fn provision(&self, spec: &RouterSpec) -> Result<Router> {
        match self.resolver.router(&spec.name).await? {
            Resolution::NotFound => {}
            Resolution::Found(_) => {
                return Err(ProvisionError::AlreadyExists {
                    kind: ResourceKind::Router,
                    name: spec.name.clone(),
                });
            }
            Resolution::Ambiguous(count) => {
                return Err(ProvisionError::Ambiguous {
                    kind: ResourceKind::Router,
                    name: spec.name.clone(),
                    count,
                });
            }
        }

        let external_gateway_info = match &spec.gateway {
            Some(gateway) => {
                let network = self
                    .resolver
                    .network(&gateway.network)
                    .await?
                    .required_dependency(ResourceKind::Network, &gateway.network)?;
                Some(ExternalGatewayInfo::new(network.id, gateway.enable_snat))
            }
            None => None,
        };

        let request = RouterCreate {
            name: spec.name.clone(),
            external_gateway_info,
        };
        let router = self.plane.create_router(&request).await?;
        tracing::info!(router = %router.name, id = %router.id, "provisioned router");
        Ok(router)
    }

    /// Attach a named external network as the router's gateway.
    ///
    /// Idempotent at the control-plane level; duplicate calls are passed
    /// through, not suppressed here.
    pub async fn add_gateway(
        &self,
        router: Selector<Router>,
        network_name: &str,
        enable_snat: bool,
    ) -> Result<Router> {
        let router = self.resolve_router(router).await?;
        let network = self
            .resolver
            .network(network_name)
            .await?
            .required(ResourceKind::Network, network_name)?;

        let gateway = ExternalGatewayInfo::new(&network.id, enable_snat);
        let router = self.plane.set_gateway(&router.id, &gateway).await?;
        tracing::info!(
            router = %router.name,
            network = %network.name,
            enable_snat,
            "attached external gateway"
        );
        Ok(router)
    }

    /// Create an interface attachment binding the subnet's network to the
    /// router.
    pub async fn connect_subnet(
        &self,
        router: Selector<Router>,
        subnet: Selector<Subnet>,
    ) -> Result<(Router, Port)> {
        let router = self.resolve_router(router).await?;
        let subnet = self.resolve_subnet(subnet).await?;

        let port = self.plane.attach_interface(&router.id, &subnet.id).await?;
        tracing::info!(
            router = %router.name,
            subnet = %subnet.name,
            port = %port.id,
            "connected subnet"
        );
        Ok((router, port))
    }

    /// Remove the interface attachment between router and subnet.
    ///
    /// An already-absent attachment is surfaced as `AttachmentNotFound`
    /// rather than swallowed; the dispatcher decides whether that is a
    /// terminal success for its retry.
    pub async fn disconnect_subnet(&self, router: &Router, subnet: &Subnet) -> Result<()> {
        match self.plane.detach_interface(&router.id, &subnet.id).await {
            Ok(()) => {
                tracing::info!(router = %router.name, subnet = %subnet.name, "disconnected subnet");
                Ok(())
            }
            Err(RemoteError::NotFound(_)) => Err(ProvisionError::AttachmentNotFound {
                router: router.name.clone(),
                subnet: subnet.name.clone(),
            }),
            Err(other) => Err(other.into()),
        }
    }

    /// Delete the router. Interface attachments must already be gone;
    /// there is no cascade-detach. A second call fails with `NotFound`,
    /// which retrying callers treat as the terminal state.
    pub async fn terminate(&self, router: Selector<Router>) -> Result<Router> {
        let router = self.resolve_router(router).await?;
        match self.plane.delete_router(&router.id).await {
            Ok(()) => {
                tracing::info!(router = %router.name, id = %router.id, "terminated router");
                Ok(router)
            }
            Err(RemoteError::Conflict(detail)) => Err(ProvisionError::DependencyExists {
                kind: ResourceKind::Router,
                name: router.name.clone(),
                detail,
            }),
            Err(other) => Err(other.into()),
        }
    }

    async fn resolve_router(&self, selector: Selector<Router>) -> Result<Router> {
        match selector {
            Selector::Object(router) => Ok(router),
            Selector::Name(name) => self
                .resolver
                .router(&name)
                .await?
                .required(ResourceKind::Router, &name),
        }
    }

    async fn resolve_subnet(&self, selector: Selector<Subnet>) -> Result<Subnet> {
        match selector {
            Selector::Object(subnet) => Ok(subnet),
            Selector::Name(name) => self
                .resolver
                .subnet(&name)
                .await?
                .required(ResourceKind::Subnet, &name),
        }
    }
}
