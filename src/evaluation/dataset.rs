// Evaluation dataset - test cases pairing a request with its expected trace
use serde::{Deserialize, Serialize};

/// One evaluation case: a user request and the worker log entries a correct
/// run is expected to produce, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub request: String,
    pub expected_sequence: Vec<String>,
}

impl EvalCase {
    pub fn new(request: &str, expected_sequence: &[&str]) -> Self {
        Self {
            request: request.to_string(),
            expected_sequence: expected_sequence.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Built-in dataset for the image-processing workflow.
pub fn builtin_dataset() -> Vec<EvalCase> {
    vec![
        EvalCase::new(
            "生成一张日落图片并添加'美丽的夜晚'文字",
            &[
                "Image Generation Agent: generated new image",
                "Text Overlay Agent: added text to image",
            ],
        ),
        EvalCase::new(
            "remove the background from my photo",
            &["Background Removal Agent: removed image background"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_dataset_has_the_sunset_case_first() {
        let cases = builtin_dataset();
        assert!(cases[0].request.contains("日落"));
        assert_eq!(cases[0].expected_sequence.len(), 2);
    }
}
