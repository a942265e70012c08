//! Tests for the workflow graph load step and its validation.
mod common;
use common::*;
use serde_json::json;
use stepflow::prelude::*;
use uuid::Uuid;

fn single_node_definition(node_type: &str, data: serde_json::Value) -> WorkflowDefinition {
    WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![node_def(Uuid::new_v4(), node_type, data)],
        edges: vec![],
    }
}

#[test]
fn test_unknown_node_type_is_rejected() {
    let definition = single_node_definition("webhookNode", json!({}));
    let node_id = definition.nodes[0].uuid;

    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnknownNodeType { node_id: id, ref type_name }
            if id == node_id && type_name == "webhookNode"
    ));
}

#[test]
fn test_payload_must_match_node_type() {
    // An action node whose data is missing the required `action` field.
    let definition = single_node_definition("actionNode", json!({ "delay_seconds": 5 }));
    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNodeData { .. }));
}

#[test]
fn test_workflow_without_trigger_is_rejected() {
    let definition = single_node_definition("actionNode", json!({ "action": "send_email" }));
    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(err, ConfigError::MissingTriggerNode { .. }));
}

#[test]
fn test_workflow_with_two_triggers_is_rejected() {
    let trigger_data = json!({ "event_type": "ordered_product" });
    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![
            node_def(Uuid::new_v4(), "triggerNode", trigger_data.clone()),
            node_def(Uuid::new_v4(), "triggerNode", trigger_data),
        ],
        edges: vec![],
    };
    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateTriggerNode { .. }));
}

#[test]
fn test_edge_to_unknown_node_is_rejected() {
    let trigger = Uuid::new_v4();
    let ghost = Uuid::new_v4();
    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![node_def(
            trigger,
            "triggerNode",
            json!({ "event_type": "ordered_product" }),
        )],
        edges: vec![edge(trigger, ghost)],
    };
    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::EdgeTargetNotFound { missing_node_id, .. } if missing_node_id == ghost
    ));
}

#[test]
fn test_decision_node_requires_both_branch_edges() {
    let trigger = Uuid::new_v4();
    let decision = Uuid::new_v4();
    let action = Uuid::new_v4();
    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![
            node_def(trigger, "triggerNode", json!({ "event_type": "ordered_product" })),
            node_def(
                decision,
                "binaryDecisionNode",
                json!({ "conditions": [ { "key": "total", "op": "exists" } ] }),
            ),
            node_def(action, "actionNode", json!({ "action": "send_email" })),
        ],
        edges: vec![
            edge(trigger, decision),
            labeled_edge(decision, action, BranchLabel::Yes),
        ],
    };
    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidDecisionNode { node_id, .. } if node_id == decision
    ));
}

#[test]
fn test_decision_node_rejects_unlabeled_edges() {
    let trigger = Uuid::new_v4();
    let decision = Uuid::new_v4();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![
            node_def(trigger, "triggerNode", json!({ "event_type": "ordered_product" })),
            node_def(
                decision,
                "binaryDecisionNode",
                json!({ "conditions": [ { "key": "total", "op": "exists" } ] }),
            ),
            node_def(a, "actionNode", json!({ "action": "a" })),
            node_def(b, "actionNode", json!({ "action": "b" })),
        ],
        edges: vec![
            edge(trigger, decision),
            edge(decision, a),
            labeled_edge(decision, b, BranchLabel::No),
        ],
    };
    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDecisionNode { .. }));
}

#[test]
fn test_decision_node_requires_conditions() {
    let definition = single_node_definition("binaryDecisionNode", json!({ "conditions": [] }));
    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDecisionNode { .. }));
}

#[test]
fn test_non_decision_node_allows_at_most_one_edge() {
    let trigger = Uuid::new_v4();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![
            node_def(trigger, "triggerNode", json!({ "event_type": "ordered_product" })),
            node_def(a, "actionNode", json!({ "action": "a" })),
            node_def(b, "actionNode", json!({ "action": "b" })),
        ],
        edges: vec![edge(trigger, a), edge(trigger, b)],
    };
    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidEdge { node_id, .. } if node_id == trigger
    ));
}

#[test]
fn test_branch_label_is_invalid_outside_decision_nodes() {
    let trigger = Uuid::new_v4();
    let a = Uuid::new_v4();
    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![
            node_def(trigger, "triggerNode", json!({ "event_type": "ordered_product" })),
            node_def(a, "actionNode", json!({ "action": "a" })),
        ],
        edges: vec![labeled_edge(trigger, a, BranchLabel::Yes)],
    };
    let err = Workflow::load(definition).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidEdge { node_id, .. } if node_id == trigger
    ));
}

#[test]
fn test_loaded_graph_exposes_nodes_by_uuid() {
    let flow = create_branching_flow();
    assert_eq!(flow.workflow.node_count(), 4);
    assert_eq!(flow.workflow.trigger_node().uuid(), flow.trigger);

    let decision = flow
        .workflow
        .find_node_by_uuid(flow.decision)
        .expect("decision node is indexed");
    assert_eq!(decision.node_type(), NodeType::BinaryDecision);
    assert!(matches!(decision.edges(), OutgoingEdges::Binary { .. }));

    assert!(flow.workflow.find_node_by_uuid(Uuid::new_v4()).is_none());
}

#[test]
fn test_decision_branches_resolve_to_labeled_targets() {
    let flow = create_branching_flow();
    let decision = flow
        .workflow
        .find_node_by_uuid(flow.decision)
        .expect("decision node is indexed");

    let OutgoingEdges::Binary { yes, no } = decision.edges() else {
        panic!("decision node must have binary edges");
    };
    assert_eq!(flow.workflow.node(yes).uuid(), flow.coupon);
    assert_eq!(flow.workflow.node(no).uuid(), flow.follow_up);
}

#[test]
fn test_definition_round_trips_through_json() {
    let trigger = Uuid::new_v4();
    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: Some(Uuid::new_v4()),
        nodes: vec![node_def(
            trigger,
            "triggerNode",
            json!({
                "event_type": "ordered_product",
                "trigger_filters": [ { "key": "product_id", "op": "equals", "value": 8 } ]
            }),
        )],
        edges: vec![],
    };

    let text = serde_json::to_string(&definition).expect("definition serializes");
    let parsed: WorkflowDefinition = serde_json::from_str(&text).expect("definition parses");
    let workflow = Workflow::load(parsed).expect("round-tripped definition loads");
    assert_eq!(workflow.trigger_node().uuid(), trigger);
    assert!(workflow.organization_uuid().is_some());
}
