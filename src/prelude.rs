//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the stepflow crate so the
//! core surface is available from a single `use`.

// Graph model
pub use crate::graph::{
    ActionNodeData, BranchLabel, DecisionNodeData, DelayNodeData, EdgeDefinition, Node, NodeData,
    NodeDefinition, NodeId, NodeType, OutgoingEdges, TriggerNodeData, Workflow, WorkflowDefinition,
};

// Events and data preparation
pub use crate::event::{Event, EventDataProvider, EventType, PreparedEventData};

// Condition evaluation
pub use crate::condition::{
    Branch, Condition, ConditionOp, ConditionProcessor, FlowContext, TriggerFilter,
};

// Traversal and execution
pub use crate::executor::{ExecutionOutcome, WorkflowExecutor};
pub use crate::traverser::{DEFAULT_MAX_STEPS, WorkflowTraverser};

// Values and errors
pub use crate::error::{
    ConditionError, ConfigError, EventDataError, ExecuteError, StoreError, TraversalError,
};
pub use crate::value::Value;

// Store seams
pub use crate::store::{EventStore, InMemoryStore, WorkflowStore};

// Hash map type used throughout this crate
pub use ahash::AHashMap;
