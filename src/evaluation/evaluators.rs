// Evaluators - judge-LLM scoring of a completed run's trace
//
// Three criteria, mirroring the evaluation framework this harness implements:
// 1. Task completion: did the system as a whole finish every requested task
// 2. Node execution path: did the agents run in a correct order
// 3. Single node execution: was a specific agent (image generation) involved
//
// Each evaluator returns a score (0.0 or 1.0) plus the judge's reasoning.
// Any failure during evaluation is reported as a 0.0 score, never an error.
use crate::completion::CompletionService;
use crate::error::CompletionError;
use crate::evaluation::dataset::EvalCase;
use crate::workflow::state::{MessageRole, TaskState};

/// Result of one evaluation criterion.
#[derive(Debug, Clone)]
pub struct EvalScore {
    pub score: f32,
    pub reasoning: String,
}

impl EvalScore {
    fn from_verdict(verdict: String) -> Self {
        let score = if verdict.to_uppercase().starts_with("CORRECT") {
            1.0
        } else {
            0.0
        };
        Self {
            score,
            reasoning: verdict,
        }
    }

    fn failure(error: CompletionError) -> Self {
        Self {
            score: 0.0,
            reasoning: format!("Error during evaluation: {}", error),
        }
    }
}

/// Worker/agent log entries from a run, in execution order.
pub fn agent_messages(state: &TaskState) -> Vec<String> {
    state
        .messages
        .iter()
        .filter(|m| m.role == MessageRole::System && m.content.contains("Agent:"))
        .map(|m| m.content.clone())
        .collect()
}

/// Agent names extracted from the log entries ("Text Overlay" from
/// "Text Overlay Agent: added text to image").
pub fn agent_sequence(state: &TaskState) -> Vec<String> {
    agent_messages(state)
        .iter()
        .filter_map(|msg| msg.split("Agent:").next())
        .map(|name| name.trim().to_string())
        .collect()
}

fn render_sequence(sequence: &[String]) -> String {
    serde_json::to_string_pretty(sequence).unwrap_or_else(|_| format!("{:?}", sequence))
}

/// Criterion 1: task completion — the whole workflow finished every
/// requested task, in a sensible order.
pub async fn evaluate_task_completion(
    state: &TaskState,
    case: &EvalCase,
    judge: &dyn CompletionService,
) -> EvalScore {
    let instructions = "\
You are an evaluation judge. Given the actual sequence of agent actions and
the expected sequence, determine whether the workflow correctly completed all
required tasks.

Consider:
1. Were all expected actions performed?
2. Were they performed in a logical order?
3. Did any unexpected or unnecessary actions occur?

Respond with 'CORRECT' or 'INCORRECT', followed by a brief explanation.";

    let comparison = format!(
        "Original request: {}\n\nExpected sequence:\n{}\n\nActual sequence:\n{}",
        case.request,
        render_sequence(&case.expected_sequence),
        render_sequence(&agent_messages(state)),
    );

    match judge.complete(instructions, &comparison).await {
        Ok(verdict) => EvalScore::from_verdict(verdict),
        Err(e) => EvalScore::failure(e),
    }
}

/// Criterion 2: node execution path — the right agents ran in the right
/// order, with no unnecessary invocations.
pub async fn check_node_execution(
    state: &TaskState,
    case: &EvalCase,
    judge: &dyn CompletionService,
) -> EvalScore {
    let instructions = "\
You are an evaluation judge analyzing workflow execution. Given the sequence
of agent actions, determine if:

1. All necessary agents were involved based on the request
2. The agents executed their tasks in the correct order
3. The sequence makes logical sense for the task

Respond with either 'CORRECT' or 'INCORRECT', followed by a brief analysis.";

    let comparison = format!(
        "Original request: {}\n\nEXPECTED WORKFLOW:\n{}\n\nACTUAL EXECUTIONS:\n{}\n\nAgent sequence: {}",
        case.request,
        render_sequence(&case.expected_sequence),
        render_sequence(&agent_messages(state)),
        render_sequence(&agent_sequence(state)),
    );

    match judge.complete(instructions, &comparison).await {
        Ok(verdict) => EvalScore::from_verdict(verdict),
        Err(e) => EvalScore::failure(e),
    }
}

/// Criterion 3: single-node check — was the image generation agent called
/// at all. A binary participation check.
pub async fn check_image_generation_node(
    state: &TaskState,
    _case: &EvalCase,
    judge: &dyn CompletionService,
) -> EvalScore {
    let instructions = "\
You are an evaluation judge. Your only task is to check whether the Image
Generation Agent was called.

Respond with:
- 'CORRECT' if you see any messages from the Image Generation Agent
- 'INCORRECT' if there are no messages from the Image Generation Agent";

    let image_gen_messages: Vec<String> = agent_messages(state)
        .into_iter()
        .filter(|m| m.contains("Image Generation Agent:"))
        .collect();

    let comparison = format!(
        "Messages from Image Generation Agent:\n{}",
        render_sequence(&image_gen_messages),
    );

    match judge.complete(instructions, &comparison).await {
        Ok(verdict) => EvalScore::from_verdict(verdict),
        Err(e) => EvalScore::failure(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::ScriptedCompletion;
    use crate::workflow::state::StateUpdate;

    fn state_with_trace(entries: &[&str]) -> TaskState {
        let mut state = TaskState::new("request");
        for entry in entries {
            state.apply_update(StateUpdate::new().with_message(MessageRole::System, *entry));
        }
        state
    }

    #[test]
    fn agent_messages_keeps_only_worker_entries() {
        let state = state_with_trace(&[
            "Supervisor: routing to image_generation",
            "Image Generation Agent: generated new image",
            "Supervisor: routing to finish",
        ]);

        assert_eq!(
            agent_messages(&state),
            vec!["Image Generation Agent: generated new image"]
        );
    }

    #[test]
    fn agent_sequence_extracts_agent_names_in_order() {
        let state = state_with_trace(&[
            "Image Generation Agent: generated new image",
            "Text Overlay Agent: added text to image",
        ]);

        assert_eq!(agent_sequence(&state), vec!["Image Generation", "Text Overlay"]);
    }

    #[test]
    fn user_messages_never_count_as_agent_entries() {
        // The request itself contains "Agent:" but has role Human
        let state = TaskState::new("tell me about the Image Generation Agent: how does it work?");
        assert!(agent_messages(&state).is_empty());
    }

    #[tokio::test]
    async fn correct_verdict_scores_one() {
        let judge = ScriptedCompletion::new(vec!["CORRECT - both steps ran in order"]);
        let state = state_with_trace(&["Image Generation Agent: generated new image"]);
        let case = EvalCase::new("generate", &["Image Generation Agent: generated new image"]);

        let result = evaluate_task_completion(&state, &case, &judge).await;
        assert_eq!(result.score, 1.0);
        assert!(result.reasoning.starts_with("CORRECT"));
    }

    #[tokio::test]
    async fn incorrect_verdict_scores_zero() {
        let judge = ScriptedCompletion::new(vec!["INCORRECT - text overlay never ran"]);
        let state = state_with_trace(&["Image Generation Agent: generated new image"]);
        let case = EvalCase::new(
            "generate and add text",
            &[
                "Image Generation Agent: generated new image",
                "Text Overlay Agent: added text to image",
            ],
        );

        let result = check_node_execution(&state, &case, &judge).await;
        assert_eq!(result.score, 0.0);
    }

    #[tokio::test]
    async fn lowercase_correct_verdict_still_scores_one() {
        let judge = ScriptedCompletion::new(vec!["correct - the agent was called"]);
        let state = state_with_trace(&["Image Generation Agent: generated new image"]);
        let case = EvalCase::new("generate", &[]);

        let result = check_image_generation_node(&state, &case, &judge).await;
        assert_eq!(result.score, 1.0);
    }

    #[tokio::test]
    async fn judge_failure_becomes_zero_score_not_error() {
        let judge = ScriptedCompletion::new(vec![]);
        let state = state_with_trace(&[]);
        let case = EvalCase::new("anything", &[]);

        let result = evaluate_task_completion(&state, &case, &judge).await;
        assert_eq!(result.score, 0.0);
        assert!(result.reasoning.contains("Error during evaluation"));
    }
}
