use crate::graph::NodeType;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while loading an authored workflow definition into a graph.
///
/// These indicate a malformed workflow. They are fatal and never retried;
/// the fix belongs to whoever authored or published the workflow.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Node '{node_id}' has an unknown node type: '{type_name}'")]
    UnknownNodeType { node_id: Uuid, type_name: String },

    #[error("Node '{node_id}' has a data payload that does not match its type: {message}")]
    InvalidNodeData { node_id: Uuid, message: String },

    #[error("Workflow '{workflow_id}' declares no trigger node")]
    MissingTriggerNode { workflow_id: Uuid },

    #[error("Workflow '{workflow_id}' declares more than one trigger node ('{node_id}')")]
    DuplicateTriggerNode { workflow_id: Uuid, node_id: Uuid },

    #[error(
        "Node '{missing_node_id}' not found, but is referenced by an edge from node '{source_node_id}'"
    )]
    EdgeTargetNotFound {
        missing_node_id: Uuid,
        source_node_id: Uuid,
    },

    #[error("Node '{node_id}' has an invalid outgoing edge set: {message}")]
    InvalidEdge { node_id: Uuid, message: String },

    #[error("Decision node '{node_id}' is invalid: {message}")]
    InvalidDecisionNode { node_id: Uuid, message: String },
}

/// Errors raised by the traverser state machine.
///
/// `AmbiguousTraversal`, `InvalidNodeType` and `Terminated` indicate driver
/// misuse; `MaxStepsExceeded` is the runaway-loop defense against malformed
/// (cyclic) graphs.
#[derive(Error, Debug, Clone)]
pub enum TraversalError {
    #[error("Node '{node_id}' has more than one outgoing edge; use binary_next to pick a branch")]
    AmbiguousTraversal { node_id: Uuid },

    #[error("Branch advance requires a binary decision node, but node '{node_id}' is a {found}")]
    InvalidNodeType { node_id: Uuid, found: NodeType },

    #[error("Traversal has already terminated; no current node remains")]
    Terminated,

    #[error("Traversal exceeded the step ceiling of {limit}; the graph likely contains a cycle")]
    MaxStepsExceeded { limit: usize },
}

/// Errors raised by the condition processor when handed the wrong node kind
/// or a malformed decision configuration.
///
/// A condition that is simply not met is a normal `false`/`No` outcome and
/// never produces one of these.
#[derive(Error, Debug, Clone)]
pub enum ConditionError {
    #[error("Trigger condition check requires a trigger node, but node '{node_id}' is a {found}")]
    NotATriggerNode { node_id: Uuid, found: NodeType },

    #[error("Branch evaluation requires a binary decision node, but node '{node_id}' is a {found}")]
    NotADecisionNode { node_id: Uuid, found: NodeType },

    #[error("Decision node '{node_id}' is invalid: {message}")]
    InvalidDecisionNode { node_id: Uuid, message: String },
}

/// Errors raised during event data preparation.
#[derive(Error, Debug, Clone)]
pub enum EventDataError {
    #[error(
        "Filter key '{key}' is not available for event type '{event_type}' and declares no default"
    )]
    EventDataUnavailable { key: String, event_type: String },
}

/// Lookup failures reported by the external store seams.
///
/// Recoverable at the caller's discretion (e.g. retry once the record is
/// fully persisted), never treated as a passing condition.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Workflow '{0}' not found")]
    WorkflowNotFound(Uuid),

    #[error("Node '{0}' not found")]
    NodeNotFound(Uuid),

    #[error("Event '{0}' not found")]
    EventNotFound(Uuid),
}

/// Combined error surface of a full workflow run.
#[derive(Error, Debug, Clone)]
pub enum ExecuteError {
    #[error(transparent)]
    Traversal(#[from] TraversalError),

    #[error(transparent)]
    Condition(#[from] ConditionError),

    #[error(transparent)]
    EventData(#[from] EventDataError),
}
