// Executor - runs the supervisor-driven dispatch loop to completion
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::agents::background_removal::BackgroundRemovalAgent;
use crate::agents::image_generation::ImageGenerationAgent;
use crate::agents::supervisor::{RouteDecision, Supervisor};
use crate::agents::text_overlay::TextOverlayAgent;
use crate::agents::{AgentKind, WorkerAgent};
use crate::completion::CompletionService;
use crate::error::WorkflowError;
use crate::workflow::state::{TaskState, WorkflowStatus};

/// Executor config. One step = one supervisor routing round (plus the worker
/// it dispatches to, if any).
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub max_steps: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { max_steps: 25 }
    }
}

/// Workflow executor: a star topology with the supervisor as hub. Every
/// worker hands control straight back to the supervisor; the loop ends when
/// the supervisor decides to finish.
pub struct WorkflowExecutor {
    supervisor: Supervisor,
    workers: HashMap<AgentKind, Arc<dyn WorkerAgent>>,
    config: ExecutorConfig,
}

impl WorkflowExecutor {
    /// Run the workflow to completion for one user request.
    ///
    /// The step budget is the only guard against the supervisor re-routing
    /// forever; exceeding it is surfaced as its own error instead of
    /// looping unbounded.
    pub async fn run(&self, user_request: &str) -> Result<TaskState, WorkflowError> {
        let mut state = TaskState::new(user_request);
        info!("🚀 Starting workflow execution: {}", state.workflow_id);
        state.status = WorkflowStatus::Running;

        let mut step = 0;

        loop {
            step += 1;
            if step > self.config.max_steps {
                warn!("⚠️ Workflow hit step limit: {}", self.config.max_steps);
                return Err(WorkflowError::MaxStepsExceeded {
                    limit: self.config.max_steps,
                });
            }

            info!("📍 Step {}: supervisor routing", step);
            let (decision, update) = self.supervisor.route(&state).await?;
            state.apply_update(update);

            let kind = match decision {
                RouteDecision::Finish => {
                    state.status = WorkflowStatus::Completed;
                    break;
                }
                RouteDecision::Worker(kind) => kind,
            };

            let worker = self
                .workers
                .get(&kind)
                .ok_or(WorkflowError::UnknownAgent(kind))?;
            let update = worker.execute(&state).await?;
            state.apply_update(update);
        }

        info!(
            "🏁 Workflow execution finished: {} (steps: {})",
            state.workflow_id, step
        );
        Ok(state)
    }
}

/// Builder for the workflow executor. Validates at build time that every
/// routable agent kind has a registered worker.
pub struct WorkflowBuilder {
    completion: Arc<dyn CompletionService>,
    workers: HashMap<AgentKind, Arc<dyn WorkerAgent>>,
    config: ExecutorConfig,
}

impl WorkflowBuilder {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            workers: HashMap::new(),
            config: ExecutorConfig::default(),
        }
    }

    pub fn register_worker(mut self, worker: Arc<dyn WorkerAgent>) -> Self {
        self.workers.insert(worker.kind(), worker);
        self
    }

    pub fn max_steps(mut self, max: usize) -> Self {
        self.config.max_steps = max;
        self
    }

    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<WorkflowExecutor, WorkflowError> {
        for kind in AgentKind::all() {
            if !self.workers.contains_key(&kind) {
                return Err(WorkflowError::UnknownAgent(kind));
            }
        }

        Ok(WorkflowExecutor {
            supervisor: Supervisor::new(self.completion),
            workers: self.workers,
            config: self.config,
        })
    }
}

/// Build the standard image-processing workflow: supervisor hub plus the
/// three worker stubs.
pub fn build_image_workflow(
    completion: Arc<dyn CompletionService>,
    config: ExecutorConfig,
) -> Result<WorkflowExecutor, WorkflowError> {
    WorkflowBuilder::new(completion)
        .register_worker(Arc::new(ImageGenerationAgent))
        .register_worker(Arc::new(TextOverlayAgent))
        .register_worker(Arc::new(BackgroundRemovalAgent))
        .with_config(config)
        .build()
}

/// The single entry point the core exposes: seed state from the request,
/// run the dispatch loop, return the final state.
pub async fn run_workflow(
    user_request: &str,
    completion: Arc<dyn CompletionService>,
    config: ExecutorConfig,
) -> Result<TaskState, WorkflowError> {
    build_image_workflow(completion, config)?.run(user_request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::image_generation;
    use crate::agents::text_overlay;
    use crate::completion::ScriptedCompletion;
    use crate::workflow::state::MessageRole;

    async fn run_with_script(replies: Vec<&'static str>) -> Result<TaskState, WorkflowError> {
        let completion = Arc::new(ScriptedCompletion::new(replies));
        run_workflow("test request", completion, ExecutorConfig::default()).await
    }

    fn system_trace(state: &TaskState) -> Vec<&str> {
        state
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect()
    }

    #[tokio::test]
    async fn sunset_scenario_generates_then_overlays_then_terminates() {
        let completion = Arc::new(ScriptedCompletion::new(vec![
            "image_generation",
            "text_overlay",
            "finish",
        ]));
        let state = run_workflow(
            "生成一张日落图片并添加'美丽的夜晚'文字",
            completion,
            ExecutorConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            system_trace(&state),
            vec![
                "Supervisor: routing to image_generation",
                "Image Generation Agent: generated new image",
                "Supervisor: routing to text_overlay",
                "Text Overlay Agent: added text to image",
                "Supervisor: routing to finish",
            ]
        );
        assert_eq!(
            state.processed_image_url.as_deref(),
            Some(text_overlay::PLACEHOLDER_URL)
        );
        assert!(state.is_completed());
        assert_eq!(state.current_task, Some(AgentKind::TextOverlay));
    }

    #[tokio::test]
    async fn background_removal_only_runs_one_worker_step() {
        let state = run_with_script(vec!["background_removal", "finish"]).await.unwrap();

        let worker_entries: Vec<_> = system_trace(&state)
            .into_iter()
            .filter(|c| c.contains("Agent:"))
            .collect();
        assert_eq!(
            worker_entries,
            vec!["Background Removal Agent: removed image background"]
        );
        assert!(state.is_completed());
    }

    #[tokio::test]
    async fn unrecognized_response_terminates_with_zero_worker_steps() {
        let state = run_with_script(vec!["I am not sure what to do"]).await.unwrap();

        assert!(state.is_completed());
        assert!(state.current_task.is_none());
        assert!(state.processed_image_url.is_none());
        // Only the user request and the supervisor's finish entry
        assert_eq!(state.messages.len(), 2);
    }

    #[tokio::test]
    async fn each_invocation_appends_exactly_one_message() {
        let state = run_with_script(vec!["image_generation", "finish"]).await.unwrap();

        // 1 user request + 2 supervisor rounds + 1 worker step
        assert_eq!(state.messages.len(), 4);
        assert_eq!(
            state.processed_image_url.as_deref(),
            Some(image_generation::PLACEHOLDER_URL)
        );
    }

    #[tokio::test]
    async fn never_finishing_supervisor_exceeds_step_budget() {
        // ScriptedCompletion repeats the last reply forever
        let completion = Arc::new(ScriptedCompletion::new(vec!["image_generation"]));
        let result = run_workflow(
            "loop forever",
            completion,
            ExecutorConfig { max_steps: 5 },
        )
        .await;

        assert!(matches!(
            result,
            Err(WorkflowError::MaxStepsExceeded { limit: 5 })
        ));
    }

    #[tokio::test]
    async fn builder_rejects_missing_workers() {
        let completion: Arc<dyn CompletionService> =
            Arc::new(ScriptedCompletion::new(vec!["finish"]));
        let result = WorkflowBuilder::new(completion)
            .register_worker(Arc::new(ImageGenerationAgent))
            .build();

        assert!(matches!(result, Err(WorkflowError::UnknownAgent(_))));
    }
}
