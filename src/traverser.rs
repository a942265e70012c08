use crate::condition::FlowContext;
use crate::error::TraversalError;
use crate::graph::{Node, NodeId, OutgoingEdges, Workflow};
use tracing::{trace, warn};

/// Step ceiling applied when none is configured. Well-formed workflows are
/// acyclic and orders of magnitude smaller than this.
pub const DEFAULT_MAX_STEPS: usize = 128;

/// Stateful cursor that walks a workflow graph node-by-node under caller
/// control.
///
/// One traverser represents one in-flight execution: it owns its position
/// and step counter and must not be shared between callers. The graph it
/// walks is read-only, so any number of traversers may run over the same
/// [`Workflow`] in parallel.
///
/// The traverser never evaluates conditions itself. At a binary decision
/// node the caller obtains the branch decision (normally from the
/// [`ConditionProcessor`](crate::condition::ConditionProcessor)) and feeds
/// it to [`binary_next`](Self::binary_next); this keeps traversal mechanics
/// independent of condition semantics.
#[derive(Debug)]
pub struct WorkflowTraverser<'a> {
    workflow: &'a Workflow,
    context: FlowContext,
    current: Option<NodeId>,
    steps: usize,
    max_steps: usize,
}

impl<'a> WorkflowTraverser<'a> {
    /// Positions a new traverser on `start`.
    pub fn new(workflow: &'a Workflow, start: NodeId) -> Self {
        Self {
            workflow,
            context: workflow.context(),
            current: Some(start),
            steps: 0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Positions a new traverser on the workflow's trigger node, the normal
    /// entry point of a run.
    pub fn from_trigger(workflow: &'a Workflow) -> Self {
        Self::new(workflow, workflow.trigger_id())
    }

    /// Overrides the runaway-loop step ceiling.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// True while a current node remains. Read-only; safe to call
    /// repeatedly.
    pub fn has_more_nodes(&self) -> bool {
        self.current.is_some()
    }

    /// The current node, or `None` once traversal has terminated. Does not
    /// mutate state.
    pub fn current_node(&self) -> Option<&'a Node> {
        self.current.map(|id| self.workflow.node(id))
    }

    /// The flow/tenant context this traversal runs under.
    pub fn context(&self) -> &FlowContext {
        &self.context
    }

    /// Steps taken so far in this traversal.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Advances along the single outgoing edge of the current node, or
    /// terminates the traversal if the node has none.
    ///
    /// Calling this on a binary decision node is ambiguous and fails; the
    /// caller must use [`binary_next`](Self::binary_next) there instead.
    pub fn next(&mut self) -> Result<(), TraversalError> {
        let node = self.current_node().ok_or(TraversalError::Terminated)?;
        match node.edges() {
            OutgoingEdges::Binary { .. } => Err(TraversalError::AmbiguousTraversal {
                node_id: node.uuid(),
            }),
            OutgoingEdges::Single(target) => self.advance_to(Some(target)),
            OutgoingEdges::None => self.advance_to(None),
        }
    }

    /// Advances from a binary decision node along the `yes` edge when
    /// `branch_taken` is true, else along the `no` edge.
    ///
    /// The boolean is supplied by the caller; the traverser does not
    /// evaluate the node's condition.
    pub fn binary_next(&mut self, branch_taken: bool) -> Result<(), TraversalError> {
        let node = self.current_node().ok_or(TraversalError::Terminated)?;
        match node.edges() {
            OutgoingEdges::Binary { yes, no } => {
                self.advance_to(Some(if branch_taken { yes } else { no }))
            }
            _ => Err(TraversalError::InvalidNodeType {
                node_id: node.uuid(),
                found: node.node_type(),
            }),
        }
    }

    fn advance_to(&mut self, target: Option<NodeId>) -> Result<(), TraversalError> {
        if self.steps >= self.max_steps {
            warn!(
                flow = %self.context.flow_uuid,
                limit = self.max_steps,
                "traversal exceeded step ceiling, aborting run"
            );
            return Err(TraversalError::MaxStepsExceeded {
                limit: self.max_steps,
            });
        }
        self.steps += 1;

        match target {
            Some(id) => {
                trace!(
                    flow = %self.context.flow_uuid,
                    node = %self.workflow.node(id).uuid(),
                    step = self.steps,
                    "traversal advanced"
                );
            }
            None => {
                trace!(flow = %self.context.flow_uuid, step = self.steps, "traversal terminated");
            }
        }
        self.current = target;
        Ok(())
    }
}
