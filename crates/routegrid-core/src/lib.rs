//! Routegrid core
//!
//! Domain model, error taxonomy and collaborator traits shared by the
//! engine and its control-plane bindings. All authoritative state lives
//! in the remote control plane; nothing in this crate caches it.

pub mod error;
pub mod event;
pub mod memory;
pub mod model;
pub mod plane;

// Re-exports
pub use error::{ProvisionError, RemoteError, RemoteResult, Result};
pub use event::{EventSink, LifecycleEvent, LogEventSink};
pub use memory::MemoryControlPlane;
pub use model::{
    ExternalGatewayInfo, Network, Port, ResourceKind, Router, RouterCreate, Subnet,
    ROUTER_INTERFACE_OWNER,
};
pub use plane::{Connector, ControlPlane};
