//! In-memory control plane
//!
//! A faithful stand-in for the remote store, used by the engine's tests
//! and for local dry runs. It models the remote side's rules, not the
//! engine's: router names are NOT unique here (enforcing uniqueness on
//! create is the engine's job), deleting a router with live interface
//! attachments conflicts, and detaching an absent attachment is a remote
//! not-found.

use crate::error::{RemoteError, RemoteResult};
use crate::model::{
    ExternalGatewayInfo, Network, Port, Router, RouterCreate, Subnet, ROUTER_INTERFACE_OWNER,
};
use crate::plane::ControlPlane;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    routers: Vec<Router>,
    networks: Vec<Network>,
    subnets: Vec<Subnet>,
    ports: Vec<PortRecord>,
    next_id: u64,
}

/// Ports keep their subnet binding so detach-by-subnet works; the wire
/// model exposes only the network side.
#[derive(Debug, Clone)]
struct PortRecord {
    port: Port,
    subnet_id: String,
}

#[derive(Debug, Default)]
pub struct MemoryControlPlane {
    state: Mutex<State>,
}

impl MemoryControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(state: &mut State, prefix: &str) -> String {
        state.next_id += 1;
        format!("{prefix}-{:04}", state.next_id)
    }

    /// Seed a network.
    pub fn add_network(&self, name: &str, external: bool) -> Network {
        let mut state = self.state.lock().unwrap();
        let network = Network {
            id: Self::next_id(&mut state, "net"),
            name: name.to_string(),
            external,
        };
        state.networks.push(network.clone());
        network
    }

    /// Seed a subnet under an existing network.
    pub fn add_subnet(&self, name: &str, network_id: &str) -> Subnet {
        let mut state = self.state.lock().unwrap();
        let subnet = Subnet {
            id: Self::next_id(&mut state, "sub"),
            name: name.to_string(),
            network_id: network_id.to_string(),
        };
        state.subnets.push(subnet.clone());
        subnet
    }

    /// Seed a router directly, bypassing the engine. Useful for staging
    /// duplicate names the way a misbehaving second caller would.
    pub fn add_router(&self, name: &str) -> Router {
        let mut state = self.state.lock().unwrap();
        let router = Router {
            id: Self::next_id(&mut state, "rtr"),
            name: name.to_string(),
            external_gateway_info: None,
        };
        state.routers.push(router.clone());
        router
    }
}

fn filter_by_name<T: Clone>(items: &[T], name: Option<&str>, get: impl Fn(&T) -> &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| name.is_none_or(|n| get(item) == n))
        .cloned()
        .collect()
}

#[async_trait]
impl ControlPlane for MemoryControlPlane {
    async fn list_routers(&self, name: Option<&str>) -> RemoteResult<Vec<Router>> {
        let state = self.state.lock().unwrap();
        Ok(filter_by_name(&state.routers, name, |r| &r.name))
    }

    async fn list_networks(&self, name: Option<&str>) -> RemoteResult<Vec<Network>> {
        let state = self.state.lock().unwrap();
        Ok(filter_by_name(&state.networks, name, |n| &n.name))
    }

    async fn list_subnets(&self, name: Option<&str>) -> RemoteResult<Vec<Subnet>> {
        let state = self.state.lock().unwrap();
        Ok(filter_by_name(&state.subnets, name, |s| &s.name))
    }

    async fn list_ports(&self, device_id: Option<&str>) -> RemoteResult<Vec<Port>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .ports
            .iter()
            .filter(|record| device_id.is_none_or(|d| record.port.device_id == d))
            .map(|record| record.port.clone())
            .collect())
    }

    async fn create_router(&self, request: &RouterCreate) -> RemoteResult<Router> {
        let mut state = self.state.lock().unwrap();
        if let Some(gateway) = &request.external_gateway_info {
            let network = state
                .networks
                .iter()
                .find(|n| n.id == gateway.network_id)
                .ok_or_else(|| RemoteError::NotFound(gateway.network_id.clone()))?;
            if !network.external {
                return Err(RemoteError::Validation(format!(
                    "network {} is not external, can not be a router gateway",
                    network.id
                )));
            }
        }
        // No name-uniqueness check: the remote store accepts duplicates.
        let router = Router {
            id: Self::next_id(&mut state, "rtr"),
            name: request.name.clone(),
            external_gateway_info: request.external_gateway_info.clone(),
        };
        state.routers.push(router.clone());
        Ok(router)
    }

    async fn delete_router(&self, router_id: &str) -> RemoteResult<()> {
        let mut state = self.state.lock().unwrap();
        if !state.routers.iter().any(|r| r.id == router_id) {
            return Err(RemoteError::NotFound(router_id.to_string()));
        }
        let live_ports = state
            .ports
            .iter()
            .filter(|record| record.port.device_id == router_id)
            .count();
        if live_ports > 0 {
            return Err(RemoteError::Conflict(format!(
                "router {router_id} still has {live_ports} interface port(s)"
            )));
        }
        state.routers.retain(|r| r.id != router_id);
        Ok(())
    }

    async fn set_gateway(
        &self,
        router_id: &str,
        gateway: &ExternalGatewayInfo,
    ) -> RemoteResult<Router> {
        let mut state = self.state.lock().unwrap();
        let network = state
            .networks
            .iter()
            .find(|n| n.id == gateway.network_id)
            .ok_or_else(|| RemoteError::NotFound(gateway.network_id.clone()))?;
        if !network.external {
            return Err(RemoteError::Validation(format!(
                "network {} is not external, can not be a router gateway",
                network.id
            )));
        }
        let router = state
            .routers
            .iter_mut()
            .find(|r| r.id == router_id)
            .ok_or_else(|| RemoteError::NotFound(router_id.to_string()))?;
        router.external_gateway_info = Some(gateway.clone());
        Ok(router.clone())
    }

    async fn attach_interface(&self, router_id: &str, subnet_id: &str) -> RemoteResult<Port> {
        let mut state = self.state.lock().unwrap();
        if !state.routers.iter().any(|r| r.id == router_id) {
            return Err(RemoteError::NotFound(router_id.to_string()));
        }
        let network_id = state
            .subnets
            .iter()
            .find(|s| s.id == subnet_id)
            .map(|s| s.network_id.clone())
            .ok_or_else(|| RemoteError::NotFound(subnet_id.to_string()))?;
        if state
            .ports
            .iter()
            .any(|record| record.port.device_id == router_id && record.subnet_id == subnet_id)
        {
            return Err(RemoteError::Conflict(format!(
                "router {router_id} already has an interface on subnet {subnet_id}"
            )));
        }
        let port = Port {
            id: Self::next_id(&mut state, "port"),
            network_id,
            device_id: router_id.to_string(),
            device_owner: ROUTER_INTERFACE_OWNER.to_string(),
        };
        state.ports.push(PortRecord {
            port: port.clone(),
            subnet_id: subnet_id.to_string(),
        });
        Ok(port)
    }

    async fn detach_interface(&self, router_id: &str, subnet_id: &str) -> RemoteResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.ports.len();
        state
            .ports
            .retain(|record| !(record.port.device_id == router_id && record.subnet_id == subnet_id));
        if state.ports.len() == before {
            return Err(RemoteError::NotFound(format!(
                "no interface between router {router_id} and subnet {subnet_id}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_does_not_enforce_name_uniqueness() {
        let plane = MemoryControlPlane::new();
        let request = RouterCreate {
            name: "dup".into(),
            external_gateway_info: None,
        };
        plane.create_router(&request).await.unwrap();
        plane.create_router(&request).await.unwrap();
        assert_eq!(plane.list_routers(Some("dup")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_with_live_ports_conflicts() {
        let plane = MemoryControlPlane::new();
        let net = plane.add_network("net-a", false);
        let subnet = plane.add_subnet("sub-a", &net.id);
        let router = plane.add_router("edge-1");

        plane.attach_interface(&router.id, &subnet.id).await.unwrap();
        let err = plane.delete_router(&router.id).await.unwrap_err();
        assert!(matches!(err, RemoteError::Conflict(_)));

        plane.detach_interface(&router.id, &subnet.id).await.unwrap();
        plane.delete_router(&router.id).await.unwrap();
        assert!(plane.list_routers(Some("edge-1")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn detach_absent_attachment_is_not_found() {
        let plane = MemoryControlPlane::new();
        let err = plane.detach_interface("rtr-x", "sub-x").await.unwrap_err();
        assert!(matches!(err, RemoteError::NotFound(_)));
    }

    #[tokio::test]
    async fn gateway_requires_external_network() {
        let plane = MemoryControlPlane::new();
        let internal = plane.add_network("net-a", false);
        let router = plane.add_router("edge-1");
        let gateway = ExternalGatewayInfo::new(&internal.id, true);
        let err = plane.set_gateway(&router.id, &gateway).await.unwrap_err();
        assert!(matches!(err, RemoteError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_attach_conflicts() {
        let plane = MemoryControlPlane::new();
        let net = plane.add_network("net-a", false);
        let subnet = plane.add_subnet("sub-a", &net.id);
        let router = plane.add_router("edge-1");

        plane.attach_interface(&router.id, &subnet.id).await.unwrap();
        let err = plane
            .attach_interface(&router.id, &subnet.id)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Conflict(_)));
    }
}
