//! Remote resource model
//!
//! These entities are owned by the remote control plane; this crate only
//! observes and mutates them through [`crate::ControlPlane`]. Field names
//! follow the control plane's wire format so the structs double as the
//! HTTP payload types.

use serde::{Deserialize, Serialize};

/// `device_owner` value marking a port as a router interface, as opposed
/// to compute or DHCP ports sharing the same network.
pub const ROUTER_INTERFACE_OWNER: &str = "network:router_interface";

/// The closed set of resource kinds this system resolves by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Router,
    Network,
    Subnet,
}

impl ResourceKind {
    /// Collection segment used by the control plane's listing, creation
    /// and deletion endpoints for this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Router => "routers",
            ResourceKind::Network => "networks",
            ResourceKind::Subnet => "subnets",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceKind::Router => "router",
            ResourceKind::Network => "network",
            ResourceKind::Subnet => "subnet",
        };
        f.write_str(s)
    }
}

/// A logical router. Gateway attachment is carried inline; subnet
/// attachments live on separate [`Port`] objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Router {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_gateway_info: Option<ExternalGatewayInfo>,
}

/// External gateway attachment of a router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalGatewayInfo {
    pub network_id: String,
    #[serde(default = "default_snat")]
    pub enable_snat: bool,
}

fn default_snat() -> bool {
    true
}

impl ExternalGatewayInfo {
    pub fn new(network_id: impl Into<String>, enable_snat: bool) -> Self {
        Self {
            network_id: network_id.into(),
            enable_snat,
        }
    }
}

/// A virtual network. Only networks flagged `external` are eligible as
/// router gateway targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "router:external")]
    pub external: bool,
}

/// A subnet, belonging to exactly one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subnet {
    pub id: String,
    pub name: String,
    pub network_id: String,
}

/// An interface attachment binding a router (`device_id`) to a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub network_id: String,
    pub device_id: String,
    pub device_owner: String,
}

impl Port {
    /// Whether this port is a router interface (as opposed to any other
    /// port kind living on the same network).
    pub fn is_router_interface(&self) -> bool {
        self.device_owner == ROUTER_INTERFACE_OWNER
    }
}

/// Creation-time attributes for a router. The gateway, when present, is
/// set atomically with the create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_gateway_info: Option<ExternalGatewayInfo>,
}
