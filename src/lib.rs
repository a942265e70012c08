//! # Stepflow - Workflow Traversal and Trigger-Condition Evaluation Engine
//!
//! **Stepflow** is the core of an event-driven automation platform: it
//! represents a workflow as a directed graph of typed nodes, decides whether
//! an incoming business event satisfies a trigger node's filters, and walks
//! the graph node-by-node, branching at binary (yes/no) decision nodes.
//!
//! ## Core Workflow
//!
//! The engine operates on an explicitly loaded, in-memory graph. The primary
//! workflow is:
//!
//! 1.  **Load**: Parse an authored workflow (e.g. from JSON) into a
//!     [`WorkflowDefinition`](graph::WorkflowDefinition) and resolve it with
//!     [`Workflow::load`](graph::Workflow::load). All node types, payload
//!     shapes and edge invariants are checked here, once.
//! 2.  **Prepare**: Given an observed [`Event`](event::Event), build the
//!     normalized data bag with
//!     [`EventDataProvider::get_trigger_event_data`](event::EventDataProvider::get_trigger_event_data).
//! 3.  **Check**: Gate the run on
//!     [`ConditionProcessor::check_trigger_node_conditions`](condition::ConditionProcessor::check_trigger_node_conditions).
//! 4.  **Traverse**: Drive a [`WorkflowTraverser`](traverser::WorkflowTraverser)
//!     until no nodes remain, feeding each decision node's branch from
//!     [`ConditionProcessor::evaluate_branch`](condition::ConditionProcessor::evaluate_branch).
//!
//! The bundled [`WorkflowExecutor`](executor::WorkflowExecutor) wires these
//! four steps together for the common case; custom drivers can run the loop
//! themselves for finer control.
//!
//! Decision-node conditions address keys declared by the trigger's filters:
//! condition evaluation always receives the fully prepared bag and nothing
//! else.
//!
//! ## Quick Start
//!
//! ```rust
//! use stepflow::prelude::*;
//! use serde_json::json;
//! use uuid::Uuid;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let trigger = Uuid::new_v4();
//!     let decision = Uuid::new_v4();
//!     let coupon = Uuid::new_v4();
//!     let follow_up = Uuid::new_v4();
//!
//!     // Authored form, as an editor would export it.
//!     let definition: WorkflowDefinition = serde_json::from_value(json!({
//!         "uuid": Uuid::new_v4(),
//!         "nodes": [
//!             { "uuid": trigger, "node_type": "triggerNode", "data": {
//!                 "event_type": "ordered_product",
//!                 "trigger_filters": [
//!                     { "key": "product_id", "op": "equals", "value": 8 },
//!                     { "key": "total", "op": "exists" }
//!                 ]
//!             }},
//!             { "uuid": decision, "node_type": "binaryDecisionNode", "data": {
//!                 "conditions": [ { "key": "total", "op": "range", "min": 50.0, "max": 500.0 } ]
//!             }},
//!             { "uuid": coupon, "node_type": "actionNode", "data": { "action": "send_coupon" } },
//!             { "uuid": follow_up, "node_type": "actionNode", "data": { "action": "send_follow_up" } },
//!         ],
//!         "edges": [
//!             { "source": trigger, "target": decision },
//!             { "source": decision, "target": coupon, "label": "yes" },
//!             { "source": decision, "target": follow_up, "label": "no" },
//!         ]
//!     }))?;
//!
//!     let workflow = Workflow::load(definition)?;
//!
//!     let attributes: AHashMap<String, Value> = [
//!         ("product_id".to_string(), Value::from(8)),
//!         ("total".to_string(), Value::from(120.0)),
//!         ("order_id".to_string(), Value::from(1)),
//!     ]
//!     .into_iter()
//!     .collect();
//!     let event = Event::new(EventType::OrderedProduct, attributes);
//!
//!     let executor = WorkflowExecutor::new(EventDataProvider::new(), ConditionProcessor::new());
//!     let outcome = executor.run(&workflow, &event)?;
//!
//!     assert!(outcome.triggered);
//!     assert_eq!(outcome.actions.len(), 1);
//!     assert_eq!(outcome.actions[0].action, "send_coupon");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Driving the traverser directly
//!
//! ```rust,no_run
//! use stepflow::prelude::*;
//!
//! fn drive(workflow: &Workflow, prepared: &PreparedEventData) -> Result<(), ExecuteError> {
//!     let processor = ConditionProcessor::new();
//!     let mut traverser = WorkflowTraverser::from_trigger(workflow);
//!
//!     while traverser.has_more_nodes() {
//!         let Some(node) = traverser.current_node() else { break };
//!         match node.node_type() {
//!             NodeType::BinaryDecision => {
//!                 let branch = processor.evaluate_branch(node, prepared)?;
//!                 traverser.binary_next(branch.into())?;
//!             }
//!             _ => traverser.next()?,
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! A loaded [`Workflow`](graph::Workflow) is read-only; the provider and
//! processor are stateless. Each run owns its traverser, and independent
//! runs (different events, different workflows) may proceed fully in
//! parallel with no locking. Nothing in this core performs I/O.

pub mod condition;
pub mod error;
pub mod event;
pub mod executor;
pub mod graph;
pub mod prelude;
pub mod store;
pub mod traverser;
pub mod value;
