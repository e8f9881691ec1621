//! Lifecycle event emission
//!
//! Events are best-effort telemetry emitted after a state transition
//! commits. A sink failure must never be conflated with a resource
//! mutation failure; the orchestrator logs and moves on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One lifecycle transition, keyed for the external notification
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub subject_id: String,
    pub subject_name: String,
    pub category: String,
    pub key: String,
    pub value: String,
}

impl LifecycleEvent {
    /// Router state transition event, `rtr-<name>` subject naming.
    pub fn router_state(
        router_id: impl Into<String>,
        router_name: &str,
        state: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: router_id.into(),
            subject_name: format!("rtr-{router_name}"),
            category: "router status".into(),
            key: "state".into(),
            value: state.into(),
        }
    }
}

/// Fire-and-forget event consumer.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: &LifecycleEvent) -> anyhow::Result<()>;
}

/// Default sink: structured log line per event, nothing leaves the
/// process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

#[async_trait]
impl EventSink for LogEventSink {
    async fn emit(&self, event: &LifecycleEvent) -> anyhow::Result<()> {
        tracing::info!(
            subject = %event.subject_name,
            category = %event.category,
            key = %event.key,
            value = %event.value,
            "lifecycle event"
        );
        Ok(())
    }
}
