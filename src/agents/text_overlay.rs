// Text overlay worker stub - always returns the fixed placeholder artifact
use async_trait::async_trait;

use crate::agents::{AgentKind, WorkerAgent};
use crate::error::WorkflowError;
use crate::workflow::state::{MessageRole, StateUpdate, TaskState};

pub const PLACEHOLDER_URL: &str = "mock_text_overlay_image.jpg";

pub struct TextOverlayAgent;

#[async_trait]
impl WorkerAgent for TextOverlayAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::TextOverlay
    }

    async fn execute(&self, _state: &TaskState) -> Result<StateUpdate, WorkflowError> {
        tracing::info!("✍️ Text Overlay Agent: processing request...");

        Ok(StateUpdate::new()
            .with_processed_image_url(PLACEHOLDER_URL)
            .with_message(MessageRole::System, "Text Overlay Agent: added text to image"))
    }
}
