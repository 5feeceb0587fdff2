// Error types for the workflow core and the completion-service client
use thiserror::Error;

use crate::agents::AgentKind;

/// Errors surfaced by the completion-service client.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No completion choices in response")]
    EmptyResponse,
}

/// Errors surfaced by the workflow dispatch loop.
///
/// An unparseable routing response is NOT an error: the supervisor maps it
/// to the finish decision. Worker stubs cannot fail by construction, so the
/// only runtime failures are the completion call and the step budget.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Completion service error: {0}")]
    Completion(#[from] CompletionError),
    #[error("Maximum steps exceeded: {limit}")]
    MaxStepsExceeded { limit: usize },
    #[error("No worker registered for agent '{0}'")]
    UnknownAgent(AgentKind),
}
