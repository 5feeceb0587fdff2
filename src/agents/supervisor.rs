// Supervisor agent - routes the request by interpreting completion-service output
use std::sync::Arc;

use crate::agents::AgentKind;
use crate::completion::CompletionService;
use crate::error::WorkflowError;
use crate::workflow::state::{MessageRole, StateUpdate, TaskState};

/// Fixed instruction prompt sent on every routing round trip.
const SYSTEM_PROMPT: &str = "\
You are a supervisor agent coordinating image processing tasks.
Based on the user's request and the current state, determine the next task to execute.

Available tasks:
1. image_generation - when the user needs a new image created
2. text_overlay - when text must be added on top of an image
3. background_removal - when the background must be removed from an image

Rules:
- Process tasks in order until every requested operation is done
- If the request mentions creating/generating an image, start with 'image_generation'
- After image generation, if text/captions were requested, use 'text_overlay'
- If the request mentions removing/deleting the background, use 'background_removal'
- Only reply 'finish' once every requested task is complete
- Consider both the original request and the current task state when deciding

Example sequences:
- \"generate an image and add text\" -> image_generation -> text_overlay -> finish
- \"create an image, remove the background, add text\" -> image_generation -> background_removal -> text_overlay -> finish";

/// The supervisor's routing decision: one of the three workers, or finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Worker(AgentKind),
    Finish,
}

impl std::fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteDecision::Worker(kind) => f.write_str(kind.as_str()),
            RouteDecision::Finish => f.write_str("finish"),
        }
    }
}

/// Interpret the completion service's free-text reply.
///
/// Keywords are checked in fixed priority order; text matching none of them
/// maps to `Finish`. That fallback is the contract for ambiguous replies,
/// not an error case.
pub fn parse_route_decision(response: &str) -> RouteDecision {
    let lowered = response.to_lowercase();
    for kind in AgentKind::all() {
        if lowered.contains(kind.as_str()) {
            return RouteDecision::Worker(kind);
        }
    }
    RouteDecision::Finish
}

/// Supervisor: one completion round trip per routing decision, no retry.
/// The completion client is injected so tests can script it.
pub struct Supervisor {
    completion: Arc<dyn CompletionService>,
}

impl Supervisor {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Decide the next step. Returns the decision plus the state update that
    /// records it (sets `current_task`, appends exactly one trace entry).
    pub async fn route(
        &self,
        state: &TaskState,
    ) -> Result<(RouteDecision, StateUpdate), WorkflowError> {
        tracing::info!("🎯 Supervisor: deciding next task...");

        let user_prompt = format!(
            "Original request: {}\nCurrent task: {}\n\nWhat should the next task be?",
            state.original_request(),
            state
                .current_task
                .map(|t| t.as_str())
                .unwrap_or("none"),
        );

        let response = self.completion.complete(SYSTEM_PROMPT, &user_prompt).await?;
        let decision = parse_route_decision(&response);

        tracing::info!("➡️ Next agent: {}", decision);

        let mut update = StateUpdate::new()
            .with_message(MessageRole::System, format!("Supervisor: routing to {}", decision));
        if let RouteDecision::Worker(kind) = decision {
            update = update.with_current_task(kind);
        }

        Ok((decision, update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::ScriptedCompletion;
    use crate::error::CompletionError;
    use async_trait::async_trait;

    #[test]
    fn parse_picks_known_keywords_case_insensitively() {
        assert_eq!(
            parse_route_decision("The next task should be IMAGE_GENERATION."),
            RouteDecision::Worker(AgentKind::ImageGeneration)
        );
        assert_eq!(
            parse_route_decision("text_overlay"),
            RouteDecision::Worker(AgentKind::TextOverlay)
        );
        assert_eq!(
            parse_route_decision("please run background_removal now"),
            RouteDecision::Worker(AgentKind::BackgroundRemoval)
        );
    }

    #[test]
    fn parse_priority_order_prefers_image_generation() {
        // Both keywords present: image_generation wins by priority
        assert_eq!(
            parse_route_decision("image_generation then text_overlay"),
            RouteDecision::Worker(AgentKind::ImageGeneration)
        );
    }

    #[test]
    fn parse_defaults_to_finish_on_unrecognized_text() {
        assert_eq!(parse_route_decision("all done!"), RouteDecision::Finish);
        assert_eq!(parse_route_decision(""), RouteDecision::Finish);
        assert_eq!(parse_route_decision("finish"), RouteDecision::Finish);
    }

    #[tokio::test]
    async fn route_records_decision_and_one_trace_entry() {
        let supervisor = Supervisor::new(Arc::new(ScriptedCompletion::new(vec![
            "image_generation",
        ])));
        let state = TaskState::new("generate a sunset image");

        let (decision, update) = supervisor.route(&state).await.unwrap();

        assert_eq!(decision, RouteDecision::Worker(AgentKind::ImageGeneration));
        assert_eq!(update.current_task, Some(AgentKind::ImageGeneration));
        let messages = update.messages.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].content,
            "Supervisor: routing to image_generation"
        );
    }

    #[tokio::test]
    async fn route_finish_leaves_current_task_untouched() {
        let supervisor = Supervisor::new(Arc::new(ScriptedCompletion::new(vec![
            "everything requested is complete",
        ])));
        let state = TaskState::new("anything");

        let (decision, update) = supervisor.route(&state).await.unwrap();

        assert_eq!(decision, RouteDecision::Finish);
        assert!(update.current_task.is_none());
    }

    struct FailingCompletion;

    #[async_trait]
    impl CompletionService for FailingCompletion {
        async fn complete(&self, _s: &str, _u: &str) -> Result<String, CompletionError> {
            Err(CompletionError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn completion_failure_propagates_uncaught() {
        let supervisor = Supervisor::new(Arc::new(FailingCompletion));
        let state = TaskState::new("anything");

        assert!(matches!(
            supervisor.route(&state).await,
            Err(WorkflowError::Completion(_))
        ));
    }
}
