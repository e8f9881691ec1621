mod common;

use common::{FailingSink, MemoryConnector, RecordingSink};
use routegrid::{Orchestrator, ProvisionError, RouterSpec};
use routegrid_core::{ControlPlane, MemoryControlPlane};
use std::sync::Arc;

fn orchestrator(
    plane: &Arc<MemoryControlPlane>,
    sink: Arc<dyn routegrid_core::EventSink>,
) -> Orchestrator {
    Orchestrator::new(Arc::new(MemoryConnector::new(plane.clone())), sink)
}

#[tokio::test]
async fn one_event_per_successful_transition() {
    let plane = Arc::new(MemoryControlPlane::new());
    plane.add_network("public-net", true);
    let net = plane.add_network("net-a", false);
    plane.add_subnet("sub-a", &net.id);

    let sink = Arc::new(RecordingSink::default());
    let orch = orchestrator(&plane, sink.clone());

    orch.provision(&RouterSpec::bare("edge-1")).await.unwrap();
    orch.add_gateway("edge-1", "public-net", true).await.unwrap();
    orch.connect_subnet("edge-1", "sub-a").await.unwrap();
    orch.disconnect_subnet("edge-1", "sub-a").await.unwrap();
    orch.terminate("edge-1").await.unwrap();

    assert_eq!(
        sink.values(),
        vec![
            "running",
            "gateway-attached",
            "subnet-connected",
            "subnet-disconnected",
            "terminated"
        ]
    );

    let events = sink.events.lock().unwrap();
    assert!(events.iter().all(|e| e.subject_name == "rtr-edge-1"));
    assert!(events.iter().all(|e| e.category == "router status"));
}

#[tokio::test]
async fn no_event_on_failed_transition() {
    let plane = Arc::new(MemoryControlPlane::new());
    let sink = Arc::new(RecordingSink::default());
    let orch = orchestrator(&plane, sink.clone());

    orch.provision(&RouterSpec::bare("edge-1")).await.unwrap();
    let err = orch.provision(&RouterSpec::bare("edge-1")).await.unwrap_err();
    assert!(matches!(err, ProvisionError::AlreadyExists { .. }));

    assert_eq!(sink.values(), vec!["running"]);
}

#[tokio::test]
async fn sink_failure_does_not_fail_the_mutation() {
    let plane = Arc::new(MemoryControlPlane::new());
    let orch = orchestrator(&plane, Arc::new(FailingSink));

    orch.provision(&RouterSpec::bare("edge-1")).await.unwrap();

    // The mutation committed even though every emit failed.
    assert_eq!(plane.list_routers(Some("edge-1")).await.unwrap().len(), 1);
}
