// CompletionService - opaque text-completion dependency consumed by the supervisor
use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::CompletionError;

/// Opaque text-completion service: one system prompt, one user prompt,
/// free-form text back. The supervisor and the evaluation judge both go
/// through this seam, so tests can substitute a deterministic impl.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError>;
}

/// Deterministic completion service that replays a fixed script of replies.
///
/// Once the script is exhausted it keeps returning the last reply, which
/// makes "never signals finish" scenarios easy to express.
pub struct ScriptedCompletion {
    replies: Vec<String>,
    cursor: Mutex<usize>,
}

impl ScriptedCompletion {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: replies.into_iter().map(String::from).collect(),
            cursor: Mutex::new(0),
        }
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, CompletionError> {
        let mut cursor = self.cursor.lock().expect("script cursor poisoned");
        let index = (*cursor).min(self.replies.len().saturating_sub(1));
        *cursor += 1;
        match self.replies.get(index) {
            Some(reply) => Ok(reply.clone()),
            None => Err(CompletionError::EmptyResponse),
        }
    }
}
