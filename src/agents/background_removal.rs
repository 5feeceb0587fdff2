// Background removal worker stub - always returns the fixed placeholder artifact
use async_trait::async_trait;

use crate::agents::{AgentKind, WorkerAgent};
use crate::error::WorkflowError;
use crate::workflow::state::{MessageRole, StateUpdate, TaskState};

pub const PLACEHOLDER_URL: &str = "mock_bg_removed_image.jpg";

pub struct BackgroundRemovalAgent;

#[async_trait]
impl WorkerAgent for BackgroundRemovalAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::BackgroundRemoval
    }

    async fn execute(&self, _state: &TaskState) -> Result<StateUpdate, WorkflowError> {
        tracing::info!("✂️ Background Removal Agent: processing request...");

        Ok(StateUpdate::new()
            .with_processed_image_url(PLACEHOLDER_URL)
            .with_message(
                MessageRole::System,
                "Background Removal Agent: removed image background",
            ))
    }
}
