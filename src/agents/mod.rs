// Agents module - supervisor plus the three image-processing worker stubs
pub mod background_removal;
pub mod image_generation;
pub mod supervisor;
pub mod text_overlay;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::workflow::state::{StateUpdate, TaskState};

/// Identity of a routable worker agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    ImageGeneration,
    TextOverlay,
    BackgroundRemoval,
}

impl AgentKind {
    /// Wire/keyword form, matching the task names the supervisor prompt uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::ImageGeneration => "image_generation",
            AgentKind::TextOverlay => "text_overlay",
            AgentKind::BackgroundRemoval => "background_removal",
        }
    }

    /// All routable kinds, in the supervisor's fixed priority order.
    pub fn all() -> [AgentKind; 3] {
        [
            AgentKind::ImageGeneration,
            AgentKind::TextOverlay,
            AgentKind::BackgroundRemoval,
        ]
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worker agent contract. Workers consume the task state, produce a partial
/// state update, and always hand control back to the supervisor; they never
/// route to another worker directly.
#[async_trait]
pub trait WorkerAgent: Send + Sync {
    fn kind(&self) -> AgentKind;

    async fn execute(&self, state: &TaskState) -> Result<StateUpdate, WorkflowError>;
}
