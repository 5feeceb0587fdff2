// Workflow orchestration module - supervisor-driven dispatch loop
pub mod executor;
pub mod state;

pub use executor::{build_image_workflow, run_workflow, ExecutorConfig, WorkflowBuilder, WorkflowExecutor};
pub use state::{MessageRole, StateMessage, StateUpdate, TaskState, WorkflowStatus};
