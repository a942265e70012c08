use crate::error::ConditionError;
use crate::event::{Event, PreparedEventData};
use crate::graph::Node;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Branch selector produced by evaluating a binary decision node. There is
/// no "neither" outcome for a properly configured decision node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Yes,
    No,
}

impl Branch {
    pub fn is_yes(&self) -> bool {
        matches!(self, Branch::Yes)
    }
}

impl From<bool> for Branch {
    fn from(taken: bool) -> Self {
        if taken { Branch::Yes } else { Branch::No }
    }
}

impl From<Branch> for bool {
    fn from(branch: Branch) -> Self {
        branch.is_yes()
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Yes => write!(f, "yes"),
            Branch::No => write!(f, "no"),
        }
    }
}

/// Flow/tenant identifiers threaded through every condition evaluation.
///
/// The core passes these opaquely; they exist so evaluation can be scoped
/// per tenant and flow without coupling the processor to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowContext {
    pub flow_uuid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_uuid: Option<Uuid>,
}

impl FlowContext {
    pub fn new(flow_uuid: Uuid) -> Self {
        Self {
            flow_uuid,
            organization_uuid: None,
        }
    }

    pub fn with_organization(mut self, organization_uuid: Uuid) -> Self {
        self.organization_uuid = Some(organization_uuid);
        self
    }
}

/// Evaluates a node's configured conditions against a prepared data bag.
///
/// Pure boolean decision logic: deterministic, side-effect free and
/// idempotent, so a single instance is safe to share across concurrent
/// traversals. A condition that is not met is a normal `false`/`No`
/// outcome; errors are reserved for misuse and broken configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConditionProcessor;

impl ConditionProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Decides whether `event` satisfies the trigger node's declared
    /// filters, evaluated against `prepared`.
    ///
    /// The event type must match the trigger's declared type. Top-level
    /// filters conjoin; when OR-groups are declared, each group conjoins
    /// internally and the groups combine with OR before conjoining with the
    /// top-level filters. An absent filter key fails its condition rather
    /// than raising.
    pub fn check_trigger_node_conditions(
        &self,
        node: &Node,
        event: &Event,
        prepared: &PreparedEventData,
        context: &FlowContext,
    ) -> Result<bool, ConditionError> {
        let data = node.trigger_data()?;

        let passed = data.event_type == event.event_type()
            && data
                .trigger_filters
                .iter()
                .all(|f| f.condition.is_satisfied_by(prepared))
            && (data.any_groups.is_empty()
                || data
                    .any_groups
                    .iter()
                    .any(|group| group.iter().all(|f| f.condition.is_satisfied_by(prepared))));

        debug!(
            flow = %context.flow_uuid,
            node = %node.uuid(),
            event = %event.uuid(),
            passed,
            "trigger condition check"
        );
        Ok(passed)
    }

    /// Reduces a binary decision node's condition expression to a branch
    /// selector against `prepared`.
    ///
    /// A decision node with no conditions cannot pick a branch; that is a
    /// fatal authoring error, never a silent default branch.
    pub fn evaluate_branch(
        &self,
        node: &Node,
        prepared: &PreparedEventData,
    ) -> Result<Branch, ConditionError> {
        let data = node.decision_data()?;
        if data.conditions.is_empty() {
            return Err(ConditionError::InvalidDecisionNode {
                node_id: node.uuid(),
                message: "declares no conditions".to_string(),
            });
        }

        let taken = data
            .conditions
            .iter()
            .all(|c| c.is_satisfied_by(prepared));
        Ok(Branch::from(taken))
    }
}
