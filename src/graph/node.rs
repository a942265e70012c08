use crate::condition::{Condition, TriggerFilter};
use crate::error::ConditionError;
use crate::event::EventType;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Index of a node within its owning [`Workflow`](crate::graph::Workflow)
/// arena. Edge targets are resolved to these at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// The kind of a workflow graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Trigger,
    BinaryDecision,
    Action,
    Delay,
}

impl NodeType {
    /// Resolves a wire name (`"triggerNode"`, ...) to a type.
    pub(crate) fn from_wire(name: &str) -> Option<Self> {
        match name {
            "triggerNode" => Some(NodeType::Trigger),
            "binaryDecisionNode" => Some(NodeType::BinaryDecision),
            "actionNode" => Some(NodeType::Action),
            "delayNode" => Some(NodeType::Delay),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            NodeType::Trigger => "triggerNode",
            NodeType::BinaryDecision => "binaryDecisionNode",
            NodeType::Action => "actionNode",
            NodeType::Delay => "delayNode",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// Payload of a trigger node: the event type it fires on and the declarative
/// filters an incoming event must satisfy.
///
/// `trigger_filters` are conjoined. When `any_groups` is non-empty, each
/// group conjoins internally and the groups combine with OR; the OR result
/// is then conjoined with the top-level filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerNodeData {
    pub event_type: EventType,
    #[serde(default)]
    pub trigger_filters: Vec<TriggerFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_groups: Vec<Vec<TriggerFilter>>,
}

impl TriggerNodeData {
    /// Every declared filter, across the top-level set and all OR-groups.
    /// This is the set data preparation iterates over.
    pub fn all_filters(&self) -> impl Iterator<Item = &TriggerFilter> {
        self.trigger_filters
            .iter()
            .chain(self.any_groups.iter().flatten())
    }
}

/// Payload of a binary decision node: the conjoined conditions that select
/// the `yes` branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionNodeData {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Payload of an action node. The core only carries it; execution belongs
/// to the surrounding driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionNodeData {
    pub action: String,
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

/// Payload of a delay node. Scheduling the wait is the surrounding
/// executor's concern; traversal passes straight through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayNodeData {
    pub delay_seconds: u64,
}

/// Type-specific node payload, resolved once at load time and never
/// re-dispatched dynamically during traversal.
#[derive(Debug, Clone)]
pub enum NodeData {
    Trigger(TriggerNodeData),
    Decision(DecisionNodeData),
    Action(ActionNodeData),
    Delay(DelayNodeData),
}

/// Resolved outgoing edges of a node.
///
/// The shape encodes the load-time invariants: a binary decision node has
/// exactly a `yes` and a `no` target, every other type at most one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutgoingEdges {
    None,
    Single(NodeId),
    Binary { yes: NodeId, no: NodeId },
}

/// A typed workflow graph node. Owned by its [`Workflow`](crate::graph::Workflow)
/// and immutable during traversal.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) uuid: Uuid,
    pub(crate) node_type: NodeType,
    pub(crate) data: NodeData,
    pub(crate) edges: OutgoingEdges,
}

impl Node {
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn edges(&self) -> OutgoingEdges {
        self.edges
    }

    /// The trigger payload, or an error if this node is of another kind.
    pub fn trigger_data(&self) -> Result<&TriggerNodeData, ConditionError> {
        match &self.data {
            NodeData::Trigger(data) => Ok(data),
            _ => Err(ConditionError::NotATriggerNode {
                node_id: self.uuid,
                found: self.node_type,
            }),
        }
    }

    /// The decision payload, or an error if this node is of another kind.
    pub fn decision_data(&self) -> Result<&DecisionNodeData, ConditionError> {
        match &self.data {
            NodeData::Decision(data) => Ok(data),
            _ => Err(ConditionError::NotADecisionNode {
                node_id: self.uuid,
                found: self.node_type,
            }),
        }
    }

    /// The action payload, if this is an action node.
    pub fn action_data(&self) -> Option<&ActionNodeData> {
        match &self.data {
            NodeData::Action(data) => Some(data),
            _ => None,
        }
    }
}
