//! Shared fixtures: a seeded in-memory control plane behind a `Connector`
//! and an event sink that records (or refuses) everything.

use async_trait::async_trait;
use routegrid_core::{
    Connector, ControlPlane, EventSink, LifecycleEvent, MemoryControlPlane, RemoteResult,
};
use std::sync::{Arc, Mutex};

/// Connector handing out the same in-memory plane for every session.
pub struct MemoryConnector {
    plane: Arc<MemoryControlPlane>,
}

impl MemoryConnector {
    pub fn new(plane: Arc<MemoryControlPlane>) -> Self {
        Self { plane }
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self) -> RemoteResult<Arc<dyn ControlPlane>> {
        Ok(self.plane.clone() as Arc<dyn ControlPlane>)
    }
}

/// Sink that records every event it is handed.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingSink {
    pub fn values(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.value.clone())
            .collect()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: &LifecycleEvent) -> anyhow::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Sink that always fails, for checking that emission stays best-effort.
pub struct FailingSink;

#[async_trait]
impl EventSink for FailingSink {
    async fn emit(&self, _event: &LifecycleEvent) -> anyhow::Result<()> {
        anyhow::bail!("notification collector is down")
    }
}
