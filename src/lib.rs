// lib.rs - Main library file that exports all modules
pub mod agents;
pub mod completion;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod openai_client;
pub mod workflow;

// Re-export commonly used types for convenience
pub use agents::AgentKind;
pub use completion::CompletionService;
pub use config::Settings;
pub use error::{CompletionError, WorkflowError};
pub use openai_client::OpenAiClient;
pub use workflow::{run_workflow, ExecutorConfig, TaskState};
