//! Routegrid engine
//!
//! Idempotent resource-resolution and lifecycle-transition engine for
//! virtual-network routers against a remote SDN control plane. The
//! engine resolves human-supplied names to at most one live remote
//! object, guards every transition on freshly-read remote state, and
//! drives routers bare → gateway-attached → subnet-attached, tolerating
//! partial completion and repeated invocation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              external task dispatcher            │
//! │            (one invocation per intent)           │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                 Orchestrator                     │
//! │   connect → lifecycle op → lifecycle event       │
//! └───────┬─────────────────────────────┬───────────┘
//!         │                             │
//! ┌───────▼───────┐             ┌───────▼───────┐
//! │   Lifecycle   │────────────▶│   Resolver    │
//! │  provision /  │   resolve   │ name → 0|1|N  │
//! │  attach / …   │             │    objects    │
//! └───────┬───────┘             └───────┬───────┘
//!         │                             │
//! ┌───────▼─────────────────────────────▼───────────┐
//! │         trait ControlPlane (remote store)        │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! No component retains state across invocations; all state lives in the
//! remote control plane and is re-read on every call.

pub mod lifecycle;
pub mod orchestrator;
pub mod resolver;

// Re-exports
pub use lifecycle::{GatewaySpec, Lifecycle, RouterSpec, Selector};
pub use orchestrator::Orchestrator;
pub use resolver::{Resolution, Resolver};
pub use routegrid_core::{
    Connector, ControlPlane, EventSink, LifecycleEvent, LogEventSink, ProvisionError, RemoteError,
    ResourceKind, Result, Router,
};
