use crate::condition::FlowContext;
use crate::error::ConfigError;
use crate::graph::definition::{BranchLabel, WorkflowDefinition};
use crate::graph::node::{
    DecisionNodeData, Node, NodeData, NodeId, NodeType, OutgoingEdges,
};
use ahash::AHashMap;
use itertools::Itertools;
use tracing::debug;
use uuid::Uuid;

/// A loaded workflow graph: an arena of typed nodes with resolved edges and
/// a designated trigger node.
///
/// Built once from a [`WorkflowDefinition`] by [`Workflow::load`] and
/// immutable afterwards, so it can be shared freely across concurrent
/// traversals. Structural edits require loading a new graph.
#[derive(Debug, Clone)]
pub struct Workflow {
    uuid: Uuid,
    organization_uuid: Option<Uuid>,
    nodes: Vec<Node>,
    index: AHashMap<Uuid, NodeId>,
    trigger: NodeId,
}

impl Workflow {
    /// Resolves an authored definition into a traversable graph.
    ///
    /// This is the single place node types, payload shapes and edge
    /// invariants are checked; traversal assumes all of them afterwards.
    pub fn load(definition: WorkflowDefinition) -> Result<Self, ConfigError> {
        let WorkflowDefinition {
            uuid,
            organization_uuid,
            nodes: node_defs,
            edges: edge_defs,
        } = definition;

        let mut index: AHashMap<Uuid, NodeId> = AHashMap::with_capacity(node_defs.len());
        let mut typed: Vec<(Uuid, NodeType, NodeData)> = Vec::with_capacity(node_defs.len());
        for def in node_defs {
            let node_type =
                NodeType::from_wire(&def.node_type).ok_or_else(|| ConfigError::UnknownNodeType {
                    node_id: def.uuid,
                    type_name: def.node_type.clone(),
                })?;
            let data = resolve_payload(def.uuid, node_type, def.data)?;
            if index.insert(def.uuid, NodeId(typed.len())).is_some() {
                return Err(ConfigError::InvalidNodeData {
                    node_id: def.uuid,
                    message: "duplicate node uuid".to_string(),
                });
            }
            typed.push((def.uuid, node_type, data));
        }

        let mut outgoing: AHashMap<Uuid, Vec<(Option<BranchLabel>, NodeId)>> = AHashMap::new();
        for edge in &edge_defs {
            if !index.contains_key(&edge.source) {
                return Err(ConfigError::InvalidEdge {
                    node_id: edge.source,
                    message: format!("edge source does not exist (targets '{}')", edge.target),
                });
            }
            let target =
                *index
                    .get(&edge.target)
                    .ok_or_else(|| ConfigError::EdgeTargetNotFound {
                        missing_node_id: edge.target,
                        source_node_id: edge.source,
                    })?;
            outgoing
                .entry(edge.source)
                .or_default()
                .push((edge.label, target));
        }

        let mut nodes = Vec::with_capacity(typed.len());
        for (node_uuid, node_type, data) in typed {
            let list = outgoing.remove(&node_uuid).unwrap_or_default();
            let edges = resolve_edge_set(node_uuid, node_type, list)?;
            nodes.push(Node {
                uuid: node_uuid,
                node_type,
                data,
                edges,
            });
        }

        let mut triggers = nodes
            .iter()
            .positions(|n| n.node_type == NodeType::Trigger);
        let trigger = NodeId(
            triggers
                .next()
                .ok_or(ConfigError::MissingTriggerNode { workflow_id: uuid })?,
        );
        if let Some(duplicate) = triggers.next() {
            return Err(ConfigError::DuplicateTriggerNode {
                workflow_id: uuid,
                node_id: nodes[duplicate].uuid,
            });
        }

        debug!(workflow = %uuid, nodes = nodes.len(), "workflow graph loaded");

        Ok(Self {
            uuid,
            organization_uuid,
            nodes,
            index,
            trigger,
        })
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn organization_uuid(&self) -> Option<Uuid> {
        self.organization_uuid
    }

    /// The flow/tenant identifiers threaded through condition evaluation.
    pub fn context(&self) -> FlowContext {
        FlowContext {
            flow_uuid: self.uuid,
            organization_uuid: self.organization_uuid,
        }
    }

    /// The node at `id`. Ids are only ever produced by this workflow's own
    /// index; passing one from another graph is a driver bug.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn trigger_id(&self) -> NodeId {
        self.trigger
    }

    pub fn trigger_node(&self) -> &Node {
        &self.nodes[self.trigger.0]
    }

    pub fn node_id_of(&self, uuid: Uuid) -> Option<NodeId> {
        self.index.get(&uuid).copied()
    }

    pub fn find_node_by_uuid(&self, uuid: Uuid) -> Option<&Node> {
        self.node_id_of(uuid).map(|id| self.node(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn resolve_payload(
    node_id: Uuid,
    node_type: NodeType,
    raw: serde_json::Value,
) -> Result<NodeData, ConfigError> {
    let invalid = |e: serde_json::Error| ConfigError::InvalidNodeData {
        node_id,
        message: e.to_string(),
    };
    let data = match node_type {
        NodeType::Trigger => NodeData::Trigger(serde_json::from_value(raw).map_err(invalid)?),
        NodeType::BinaryDecision => {
            let data: DecisionNodeData = serde_json::from_value(raw).map_err(invalid)?;
            if data.conditions.is_empty() {
                return Err(ConfigError::InvalidDecisionNode {
                    node_id,
                    message: "declares no conditions".to_string(),
                });
            }
            NodeData::Decision(data)
        }
        NodeType::Action => NodeData::Action(serde_json::from_value(raw).map_err(invalid)?),
        NodeType::Delay => NodeData::Delay(serde_json::from_value(raw).map_err(invalid)?),
    };
    Ok(data)
}

fn resolve_edge_set(
    node_uuid: Uuid,
    node_type: NodeType,
    list: Vec<(Option<BranchLabel>, NodeId)>,
) -> Result<OutgoingEdges, ConfigError> {
    if node_type == NodeType::BinaryDecision {
        let mut yes = None;
        let mut no = None;
        for (label, target) in list {
            match label {
                Some(BranchLabel::Yes) if yes.is_none() => yes = Some(target),
                Some(BranchLabel::No) if no.is_none() => no = Some(target),
                Some(_) => {
                    return Err(ConfigError::InvalidDecisionNode {
                        node_id: node_uuid,
                        message: "duplicate branch label".to_string(),
                    });
                }
                None => {
                    return Err(ConfigError::InvalidDecisionNode {
                        node_id: node_uuid,
                        message: "unlabeled outgoing edge".to_string(),
                    });
                }
            }
        }
        return match (yes, no) {
            (Some(yes), Some(no)) => Ok(OutgoingEdges::Binary { yes, no }),
            _ => Err(ConfigError::InvalidDecisionNode {
                node_id: node_uuid,
                message: "requires exactly one 'yes' and one 'no' edge".to_string(),
            }),
        };
    }

    if list.iter().any(|(label, _)| label.is_some()) {
        return Err(ConfigError::InvalidEdge {
            node_id: node_uuid,
            message: "branch labels are only valid on binary decision nodes".to_string(),
        });
    }
    let count = list.len();
    match list.into_iter().at_most_one() {
        Ok(None) => Ok(OutgoingEdges::None),
        Ok(Some((_, target))) => Ok(OutgoingEdges::Single(target)),
        Err(_) => Err(ConfigError::InvalidEdge {
            node_id: node_uuid,
            message: format!("{} outgoing edges, at most one is allowed", count),
        }),
    }
}
