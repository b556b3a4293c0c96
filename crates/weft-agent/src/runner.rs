use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;

/// One role-tagged turn of model input, produced by the context projector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One incremental unit of model output. `MessageDone` carries the full
/// concatenated text so consumers never have to reassemble deltas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    TextDelta { text: String },
    MessageDone { text: String },
}

/// Provider faults, classified so the stream adapter can phrase them for
/// the client. All classes are treated as retryable downstream.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Model provider quota exceeded. Please check your billing and plan details.")]
    Quota,

    #[error("Model provider rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Model provider error: {0}")]
    Provider(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<Fragment, RunnerError>> + Send>>;

/// External collaborator boundary: an opaque streaming text generator.
/// The core never retries a failed run; a failure surfaces as a single
/// terminal error and the stream adapter turns it into an error event.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    async fn run(&self, instructions: &str, turns: &[Turn])
        -> Result<FragmentStream, RunnerError>;
}
