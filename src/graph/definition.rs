use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The raw, authored form of a workflow, as exported by an editor or read
/// back from storage. This is the input to the explicit load step
/// ([`Workflow::load`](crate::graph::Workflow::load)); nothing in the core
/// operates on it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub uuid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_uuid: Option<Uuid>,
    pub nodes: Vec<NodeDefinition>,
    pub edges: Vec<EdgeDefinition>,
}

/// A single authored node. `node_type` is a wire string resolved to a
/// [`NodeType`](crate::graph::NodeType) at load time; `data` is the opaque
/// payload whose shape is determined by that type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub uuid: Uuid,
    pub node_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// An authored connection between two nodes. Decision branches carry a
/// `yes`/`no` label; every other edge is unlabeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDefinition {
    pub source: Uuid,
    pub target: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<BranchLabel>,
}

/// Label on an outgoing edge of a binary decision node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchLabel {
    Yes,
    No,
}
