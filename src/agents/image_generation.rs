// Image generation worker stub - always returns the fixed placeholder artifact
use async_trait::async_trait;

use crate::agents::{AgentKind, WorkerAgent};
use crate::error::WorkflowError;
use crate::workflow::state::{MessageRole, StateUpdate, TaskState};

pub const PLACEHOLDER_URL: &str = "mock_generated_image.jpg";

pub struct ImageGenerationAgent;

#[async_trait]
impl WorkerAgent for ImageGenerationAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::ImageGeneration
    }

    async fn execute(&self, _state: &TaskState) -> Result<StateUpdate, WorkflowError> {
        tracing::info!("🎨 Image Generation Agent: processing request...");

        Ok(StateUpdate::new()
            .with_processed_image_url(PLACEHOLDER_URL)
            .with_message(
                MessageRole::System,
                "Image Generation Agent: generated new image",
            ))
    }
}
