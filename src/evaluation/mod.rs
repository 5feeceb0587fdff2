// Evaluation harness - judge-LLM scoring of workflow runs
pub mod dataset;
pub mod evaluators;

pub use dataset::{builtin_dataset, EvalCase};
pub use evaluators::{
    check_image_generation_node, check_node_execution, evaluate_task_completion, EvalScore,
};
