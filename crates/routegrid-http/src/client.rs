//! HTTP control-plane client
//!
//! Speaks the v2.0 REST surface of the remote SDN control plane: listing
//! is name-filtered GETs over the kind's collection segment, mutations
//! are POST/PUT/DELETE with one-field JSON envelopes. Remote failures
//! are translated into [`RemoteError`] kinds by status code; everything
//! else about the error taxonomy is the engine's business.

use crate::config::{IdentityConfig, PlaneConfig};
use crate::identity::IdentityClient;
use async_trait::async_trait;
use routegrid_core::{
    Connector, ControlPlane, ExternalGatewayInfo, Network, Port, RemoteError, RemoteResult,
    ResourceKind, Router, RouterCreate, Subnet, ROUTER_INTERFACE_OWNER,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;

const AUTH_HEADER: &str = "X-Auth-Token";

/// One authenticated session against the control plane.
pub struct HttpControlPlane {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpControlPlane {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v2.0/{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> RemoteResult<T> {
        let response = self
            .client
            .get(url)
            .header(AUTH_HEADER, &self.token)
            .send()
            .await
            .map_err(transport)?;
        read_json(check(response).await?).await
    }

    async fn list<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        name: Option<&str>,
    ) -> RemoteResult<T> {
        let mut url = self.url(kind.collection());
        if let Some(name) = name {
            url = format!("{url}?name={name}");
        }
        self.get_json(&url).await
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn list_routers(&self, name: Option<&str>) -> RemoteResult<Vec<Router>> {
        let envelope: RoutersEnvelope = self.list(ResourceKind::Router, name).await?;
        Ok(envelope.routers)
    }

    async fn list_networks(&self, name: Option<&str>) -> RemoteResult<Vec<Network>> {
        let envelope: NetworksEnvelope = self.list(ResourceKind::Network, name).await?;
        Ok(envelope.networks)
    }

    async fn list_subnets(&self, name: Option<&str>) -> RemoteResult<Vec<Subnet>> {
        let envelope: SubnetsEnvelope = self.list(ResourceKind::Subnet, name).await?;
        Ok(envelope.subnets)
    }

    async fn list_ports(&self, device_id: Option<&str>) -> RemoteResult<Vec<Port>> {
        let mut url = self.url("ports");
        if let Some(device_id) = device_id {
            url = format!("{url}?device_id={device_id}");
        }
        let envelope: PortsEnvelope = self.get_json(&url).await?;
        Ok(envelope.ports)
    }

    async fn create_router(&self, request: &RouterCreate) -> RemoteResult<Router> {
        let response = self
            .client
            .post(self.url("routers"))
            .header(AUTH_HEADER, &self.token)
            .json(&RouterCreateEnvelope { router: request })
            .send()
            .await
            .map_err(transport)?;
        let envelope: RouterEnvelope = read_json(check(response).await?).await?;
        Ok(envelope.router)
    }

    async fn delete_router(&self, router_id: &str) -> RemoteResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("routers/{router_id}")))
            .header(AUTH_HEADER, &self.token)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn set_gateway(
        &self,
        router_id: &str,
        gateway: &ExternalGatewayInfo,
    ) -> RemoteResult<Router> {
        let body = RouterUpdateEnvelope {
            router: RouterUpdate {
                external_gateway_info: gateway,
            },
        };
        let response = self
            .client
            .put(self.url(&format!("routers/{router_id}")))
            .header(AUTH_HEADER, &self.token)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let envelope: RouterEnvelope = read_json(check(response).await?).await?;
        Ok(envelope.router)
    }

    async fn attach_interface(&self, router_id: &str, subnet_id: &str) -> RemoteResult<Port> {
        let response = self
            .client
            .put(self.url(&format!("routers/{router_id}/add_router_interface")))
            .header(AUTH_HEADER, &self.token)
            .json(&InterfaceRequest { subnet_id })
            .send()
            .await
            .map_err(transport)?;
        let info: InterfaceInfo = read_json(check(response).await?).await?;
        Ok(Port {
            id: info.port_id,
            network_id: info.network_id,
            device_id: router_id.to_string(),
            device_owner: ROUTER_INTERFACE_OWNER.to_string(),
        })
    }

    async fn detach_interface(&self, router_id: &str, subnet_id: &str) -> RemoteResult<()> {
        let response = self
            .client
            .put(self.url(&format!("routers/{router_id}/remove_router_interface")))
            .header(AUTH_HEADER, &self.token)
            .json(&InterfaceRequest { subnet_id })
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}

/// Session factory for the HTTP binding: authenticate, hand out a fresh
/// client. One token per operation, never refreshed mid-operation.
pub struct HttpConnector {
    plane: PlaneConfig,
    identity: IdentityConfig,
}

impl HttpConnector {
    pub fn new(plane: PlaneConfig, identity: IdentityConfig) -> Self {
        Self { plane, identity }
    }

    /// Build from the configuration files on disk.
    pub fn from_env() -> crate::error::Result<Self> {
        Ok(Self::new(PlaneConfig::load()?, IdentityConfig::load()?))
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn connect(&self) -> RemoteResult<Arc<dyn ControlPlane>> {
        let token = IdentityClient::new(self.identity.clone()).authenticate().await?;
        tracing::debug!(url = %self.plane.url, "opened control-plane session");
        Ok(Arc::new(HttpControlPlane::new(&self.plane.url, token)))
    }
}

fn transport(error: reqwest::Error) -> RemoteError {
    RemoteError::Unavailable(error.to_string())
}

/// Translate a non-success status into the remote error taxonomy.
fn map_status(status: reqwest::StatusCode, body: String) -> RemoteError {
    use reqwest::StatusCode;
    match status {
        StatusCode::NOT_FOUND => RemoteError::NotFound(body),
        StatusCode::CONFLICT => RemoteError::Conflict(body),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            RemoteError::AuthenticationFailed(body)
        }
        s if s.is_client_error() => RemoteError::Validation(body),
        s => RemoteError::Unavailable(format!("{s}: {body}")),
    }
}

async fn check(response: reqwest::Response) -> RemoteResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(map_status(status, body))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> RemoteResult<T> {
    response.json().await.map_err(transport)
}

// ============ Wire envelopes ============

#[derive(Debug, Deserialize)]
struct RoutersEnvelope {
    routers: Vec<Router>,
}

#[derive(Debug, Deserialize)]
struct NetworksEnvelope {
    networks: Vec<Network>,
}

#[derive(Debug, Deserialize)]
struct SubnetsEnvelope {
    subnets: Vec<Subnet>,
}

#[derive(Debug, Deserialize)]
struct PortsEnvelope {
    ports: Vec<Port>,
}

#[derive(Debug, Deserialize)]
struct RouterEnvelope {
    router: Router,
}

#[derive(Debug, Serialize)]
struct RouterCreateEnvelope<'a> {
    router: &'a RouterCreate,
}

#[derive(Debug, Serialize)]
struct RouterUpdateEnvelope<'a> {
    router: RouterUpdate<'a>,
}

#[derive(Debug, Serialize)]
struct RouterUpdate<'a> {
    external_gateway_info: &'a ExternalGatewayInfo,
}

#[derive(Debug, Serialize)]
struct InterfaceRequest<'a> {
    subnet_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct InterfaceInfo {
    port_id: String,
    network_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_translation() {
        use reqwest::StatusCode;
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, String::new()),
            RemoteError::NotFound(_)
        ));
        assert!(matches!(
            map_status(StatusCode::CONFLICT, String::new()),
            RemoteError::Conflict(_)
        ));
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, String::new()),
            RemoteError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, String::new()),
            RemoteError::Validation(_)
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_GATEWAY, String::new()),
            RemoteError::Unavailable(_)
        ));
    }

    #[test]
    fn listing_envelope_shapes() {
        let json = r#"{"routers": [
            {"id": "r-1", "name": "edge-1", "external_gateway_info": null}
        ]}"#;
        let envelope: RoutersEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.routers.len(), 1);
        assert!(envelope.routers[0].external_gateway_info.is_none());

        let json = r#"{"networks": [
            {"id": "n-1", "name": "public-net", "router:external": true}
        ]}"#;
        let envelope: NetworksEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.networks[0].external);
    }

    #[test]
    fn create_envelope_shape() {
        let request = RouterCreate {
            name: "edge-1".into(),
            external_gateway_info: Some(ExternalGatewayInfo::new("n-1", false)),
        };
        let json = serde_json::to_value(RouterCreateEnvelope { router: &request }).unwrap();
        assert_eq!(json["router"]["name"], "edge-1");
        assert_eq!(json["router"]["external_gateway_info"]["network_id"], "n-1");
        assert_eq!(
            json["router"]["external_gateway_info"]["enable_snat"],
            false
        );
    }

    #[test]
    fn interface_info_shape() {
        // The control plane echoes more fields than we keep.
        let json = r#"{"id": "r-1", "subnet_id": "s-1", "port_id": "p-1",
                       "network_id": "n-1", "tenant_id": "t-1"}"#;
        let info: InterfaceInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.port_id, "p-1");
        assert_eq!(info.network_id, "n-1");
    }

    #[test]
    fn url_building() {
        let plane = HttpControlPlane::new("http://sdn.example:9696/", "tok");
        assert_eq!(
            plane.url(ResourceKind::Router.collection()),
            "http://sdn.example:9696/v2.0/routers"
        );
        assert_eq!(
            plane.url("routers/r-1/add_router_interface"),
            "http://sdn.example:9696/v2.0/routers/r-1/add_router_interface"
        );
    }
}
