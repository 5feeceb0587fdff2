// TaskState - mutable record threaded through the dispatch loop
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agents::AgentKind;

/// Message roles following LangChain/LangGraph patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    Human,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::Human => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// One entry of the execution trace. Insertion order is the trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl StateMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStatus {
    Initializing,
    Running,
    Completed,
}

/// The task state: created once per request, exclusively owned by whichever
/// component currently holds control, discarded after the caller reads the
/// final result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskState {
    /// Unique workflow execution ID
    pub workflow_id: String,

    /// Execution trace (appended, never truncated or reordered)
    pub messages: Vec<StateMessage>,

    /// Last routing decision made by the supervisor
    pub current_task: Option<AgentKind>,

    /// Last artifact reference produced by a worker
    pub processed_image_url: Option<String>,

    pub status: WorkflowStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskState {
    /// Seed a new state from the user request. The request becomes the first
    /// trace entry.
    pub fn new(user_request: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            workflow_id: Uuid::new_v4().to_string(),
            messages: vec![StateMessage {
                role: MessageRole::Human,
                content: user_request.into(),
                timestamp: now,
            }],
            current_task: None,
            processed_image_url: None,
            status: WorkflowStatus::Initializing,
            created_at: now,
            updated_at: now,
        }
    }

    /// The original user request (first trace entry).
    pub fn original_request(&self) -> &str {
        &self.messages[0].content
    }

    /// Apply a partial update: messages append, scalar fields replace.
    pub fn apply_update(&mut self, update: StateUpdate) {
        self.updated_at = Utc::now();

        if let Some(new_messages) = update.messages {
            self.messages.extend(new_messages);
        }
        if let Some(task) = update.current_task {
            self.current_task = Some(task);
        }
        if let Some(url) = update.processed_image_url {
            self.processed_image_url = Some(url);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == WorkflowStatus::Completed
    }
}

/// Partial state update produced by one component invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateUpdate {
    pub messages: Option<Vec<StateMessage>>,
    pub current_task: Option<AgentKind>,
    pub processed_image_url: Option<String>,
    pub status: Option<WorkflowStatus>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages
            .get_or_insert_with(Vec::new)
            .push(StateMessage::new(role, content));
        self
    }

    pub fn with_current_task(mut self, task: AgentKind) -> Self {
        self.current_task = Some(task);
        self
    }

    pub fn with_processed_image_url(mut self, url: impl Into<String>) -> Self {
        self.processed_image_url = Some(url.into());
        self
    }

    pub fn with_status(mut self, status: WorkflowStatus) -> Self {
        self.status = Some(status);
        self
    }
}
