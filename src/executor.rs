use crate::condition::ConditionProcessor;
use crate::error::ExecuteError;
use crate::event::{Event, EventDataProvider};
use crate::graph::{ActionNodeData, NodeData, Workflow};
use crate::traverser::{DEFAULT_MAX_STEPS, WorkflowTraverser};
use tracing::debug;
use uuid::Uuid;

/// Result of driving one workflow run for one event.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// Whether the trigger fired. When false, nothing was traversed.
    pub triggered: bool,
    /// Uuids of the nodes visited, in traversal order.
    pub visited: Vec<Uuid>,
    /// Action payloads encountered along the taken path, in order. Running
    /// them is the caller's job.
    pub actions: Vec<ActionNodeData>,
}

/// Drives a complete workflow run: prepares event data, gates on the
/// trigger conditions, then walks the graph, resolving each decision node
/// through the condition processor.
///
/// The provider and processor are injected at construction; the executor
/// holds no other state, so one instance can serve any number of runs.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowExecutor {
    provider: EventDataProvider,
    processor: ConditionProcessor,
    max_steps: usize,
}

impl WorkflowExecutor {
    pub fn new(provider: EventDataProvider, processor: ConditionProcessor) -> Self {
        Self {
            provider,
            processor,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Overrides the per-run traversal step ceiling.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Runs `workflow` against `event`.
    ///
    /// Returns a non-triggered outcome when the event does not satisfy the
    /// trigger's filters; that is a normal result, not an error. Errors
    /// surface broken configuration, driver misuse or a runaway graph.
    pub fn run(&self, workflow: &Workflow, event: &Event) -> Result<ExecutionOutcome, ExecuteError> {
        let trigger = workflow.trigger_node();
        let trigger_data = trigger.trigger_data()?;
        let prepared = self
            .provider
            .get_trigger_event_data(event, trigger_data.all_filters());

        let mut traverser =
            WorkflowTraverser::from_trigger(workflow).with_max_steps(self.max_steps);
        let context = traverser.context().clone();

        if !self
            .processor
            .check_trigger_node_conditions(trigger, event, &prepared, &context)?
        {
            debug!(flow = %workflow.uuid(), event = %event.uuid(), "trigger did not fire");
            return Ok(ExecutionOutcome {
                triggered: false,
                visited: Vec::new(),
                actions: Vec::new(),
            });
        }

        let mut visited = Vec::new();
        let mut actions = Vec::new();
        while traverser.has_more_nodes() {
            let Some(node) = traverser.current_node() else {
                break;
            };
            visited.push(node.uuid());

            match node.data() {
                NodeData::Decision(_) => {
                    let branch = self.processor.evaluate_branch(node, &prepared)?;
                    traverser.binary_next(branch.into())?;
                }
                NodeData::Action(action) => {
                    actions.push(action.clone());
                    traverser.next()?;
                }
                NodeData::Trigger(_) | NodeData::Delay(_) => {
                    traverser.next()?;
                }
            }
        }

        debug!(
            flow = %workflow.uuid(),
            event = %event.uuid(),
            steps = traverser.steps_taken(),
            actions = actions.len(),
            "workflow run complete"
        );
        Ok(ExecutionOutcome {
            triggered: true,
            visited,
            actions,
        })
    }
}
