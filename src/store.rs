use crate::error::StoreError;
use crate::event::Event;
use crate::graph::{Node, Workflow};
use ahash::AHashMap;
use uuid::Uuid;

/// Lookup seam the core expects from a workflow persistence layer.
///
/// Lookups happen before traversal begins, never inside the traversal
/// loop; the core itself performs no I/O.
pub trait WorkflowStore {
    fn find_workflow_by_uuid(&self, uuid: Uuid) -> Result<&Workflow, StoreError>;
    fn find_node_by_uuid(&self, uuid: Uuid) -> Result<&Node, StoreError>;
}

/// Lookup seam the core expects from an event store.
pub trait EventStore {
    fn find_event_by_uuid(&self, uuid: Uuid) -> Result<&Event, StoreError>;
}

/// Map-backed store for embedding the core without a persistence layer,
/// and for tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    workflows: AHashMap<Uuid, Workflow>,
    events: AHashMap<Uuid, Event>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_workflow(&mut self, workflow: Workflow) {
        self.workflows.insert(workflow.uuid(), workflow);
    }

    pub fn insert_event(&mut self, event: Event) {
        self.events.insert(event.uuid(), event);
    }
}

impl WorkflowStore for InMemoryStore {
    fn find_workflow_by_uuid(&self, uuid: Uuid) -> Result<&Workflow, StoreError> {
        self.workflows
            .get(&uuid)
            .ok_or(StoreError::WorkflowNotFound(uuid))
    }

    fn find_node_by_uuid(&self, uuid: Uuid) -> Result<&Node, StoreError> {
        self.workflows
            .values()
            .find_map(|workflow| workflow.find_node_by_uuid(uuid))
            .ok_or(StoreError::NodeNotFound(uuid))
    }
}

impl EventStore for InMemoryStore {
    fn find_event_by_uuid(&self, uuid: Uuid) -> Result<&Event, StoreError> {
        self.events.get(&uuid).ok_or(StoreError::EventNotFound(uuid))
    }
}
