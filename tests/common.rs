//! Common test utilities for building workflow definitions and events.
use serde_json::json;
use stepflow::prelude::*;
use uuid::Uuid;

#[allow(dead_code)]
pub fn node_def(uuid: Uuid, node_type: &str, data: serde_json::Value) -> NodeDefinition {
    NodeDefinition {
        uuid,
        node_type: node_type.to_string(),
        data,
    }
}

#[allow(dead_code)]
pub fn edge(source: Uuid, target: Uuid) -> EdgeDefinition {
    EdgeDefinition {
        source,
        target,
        label: None,
    }
}

#[allow(dead_code)]
pub fn labeled_edge(source: Uuid, target: Uuid, label: BranchLabel) -> EdgeDefinition {
    EdgeDefinition {
        source,
        target,
        label: Some(label),
    }
}

#[allow(dead_code)]
pub fn attrs(pairs: &[(&str, Value)]) -> AHashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// An `ordered_product` event carrying `{product_id: 8, order_id: 1, total: 120}`.
#[allow(dead_code)]
pub fn create_order_event() -> Event {
    Event::new(
        EventType::OrderedProduct,
        attrs(&[
            ("product_id", Value::from(8)),
            ("order_id", Value::from(1)),
            ("total", Value::from(120.0)),
        ]),
    )
}

/// A workflow with a single trigger node (no outgoing edges), for condition
/// and data-preparation tests. `trigger_data` is the raw node payload.
#[allow(dead_code)]
pub fn create_trigger_only_flow(trigger_data: serde_json::Value) -> Workflow {
    let trigger = Uuid::new_v4();
    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![node_def(trigger, "triggerNode", trigger_data)],
        edges: vec![],
    };
    Workflow::load(definition).expect("trigger-only flow should load")
}

#[allow(dead_code)]
pub struct LinearFlow {
    pub workflow: Workflow,
    pub trigger: Uuid,
    pub email: Uuid,
    pub wait: Uuid,
    pub coupon: Uuid,
}

/// `trigger -> action(send_email) -> delay -> action(send_coupon)`, where
/// the trigger fires on `product_id == 8`.
#[allow(dead_code)]
pub fn create_linear_flow() -> LinearFlow {
    let trigger = Uuid::new_v4();
    let email = Uuid::new_v4();
    let wait = Uuid::new_v4();
    let coupon = Uuid::new_v4();

    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![
            node_def(
                trigger,
                "triggerNode",
                json!({
                    "event_type": "ordered_product",
                    "trigger_filters": [
                        { "key": "product_id", "op": "equals", "value": 8 }
                    ]
                }),
            ),
            node_def(email, "actionNode", json!({ "action": "send_email" })),
            node_def(wait, "delayNode", json!({ "delay_seconds": 3600 })),
            node_def(coupon, "actionNode", json!({ "action": "send_coupon" })),
        ],
        edges: vec![
            edge(trigger, email),
            edge(email, wait),
            edge(wait, coupon),
        ],
    };

    LinearFlow {
        workflow: Workflow::load(definition).expect("linear flow should load"),
        trigger,
        email,
        wait,
        coupon,
    }
}

#[allow(dead_code)]
pub struct BranchingFlow {
    pub workflow: Workflow,
    pub trigger: Uuid,
    pub decision: Uuid,
    pub coupon: Uuid,
    pub follow_up: Uuid,
}

/// `trigger -> decision -> {yes: action(send_coupon), no: action(send_follow_up)}`.
///
/// The trigger fires on `product_id == 8` and declares `total` so it lands
/// in the prepared bag; the decision takes `yes` when `total` is in
/// `50..=500`.
#[allow(dead_code)]
pub fn create_branching_flow() -> BranchingFlow {
    let trigger = Uuid::new_v4();
    let decision = Uuid::new_v4();
    let coupon = Uuid::new_v4();
    let follow_up = Uuid::new_v4();

    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![
            node_def(
                trigger,
                "triggerNode",
                json!({
                    "event_type": "ordered_product",
                    "trigger_filters": [
                        { "key": "product_id", "op": "equals", "value": 8 },
                        { "key": "total", "op": "exists" }
                    ]
                }),
            ),
            node_def(
                decision,
                "binaryDecisionNode",
                json!({
                    "conditions": [
                        { "key": "total", "op": "range", "min": 50.0, "max": 500.0 }
                    ]
                }),
            ),
            node_def(coupon, "actionNode", json!({ "action": "send_coupon" })),
            node_def(follow_up, "actionNode", json!({ "action": "send_follow_up" })),
        ],
        edges: vec![
            edge(trigger, decision),
            labeled_edge(decision, coupon, BranchLabel::Yes),
            labeled_edge(decision, follow_up, BranchLabel::No),
        ],
    };

    BranchingFlow {
        workflow: Workflow::load(definition).expect("branching flow should load"),
        trigger,
        decision,
        coupon,
        follow_up,
    }
}

/// A flow whose action chain accidentally loops back on itself:
/// `trigger -> a -> b -> a`. Loads fine (cycles are a traversal-time
/// defense, not a load-time check); traversal must hit the step ceiling.
#[allow(dead_code)]
pub fn create_cyclic_flow() -> Workflow {
    let trigger = Uuid::new_v4();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    let definition = WorkflowDefinition {
        uuid: Uuid::new_v4(),
        organization_uuid: None,
        nodes: vec![
            node_def(
                trigger,
                "triggerNode",
                json!({ "event_type": "ordered_product" }),
            ),
            node_def(a, "actionNode", json!({ "action": "ping" })),
            node_def(b, "actionNode", json!({ "action": "pong" })),
        ],
        edges: vec![edge(trigger, a), edge(a, b), edge(b, a)],
    };

    Workflow::load(definition).expect("cyclic flow should load")
}
