//! HTTP binding for the Routegrid engine
//!
//! Implements the `ControlPlane` and `Connector` traits over the remote
//! SDN control plane's REST API, plus the identity/token client and the
//! JSON file configuration both need.

pub mod client;
pub mod config;
pub mod error;
pub mod identity;

// Re-exports
pub use client::{HttpConnector, HttpControlPlane};
pub use config::{IdentityConfig, PlaneConfig, IDENTITY_CONFIG_ENV, PLANE_CONFIG_ENV};
pub use error::{ConfigError, Result};
pub use identity::IdentityClient;
