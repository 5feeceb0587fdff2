// Settings - completion-service and workflow configuration from environment
use crate::workflow::ExecutorConfig;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Completion-service settings. Constructed once and passed explicitly to
/// the client instead of living in process-wide state.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_steps: usize,
}

impl Settings {
    /// Read settings from the environment. Only `OPENAI_API_KEY` is
    /// required; everything else has the supervisor defaults.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var("OPENAI_API_KEY")?;

        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_steps = std::env::var("WORKFLOW_MAX_STEPS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| ExecutorConfig::default().max_steps);

        Ok(Self {
            api_key,
            base_url,
            model,
            temperature: DEFAULT_TEMPERATURE,
            max_steps,
        })
    }

    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            max_steps: self.max_steps,
        }
    }
}
