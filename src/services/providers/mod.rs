/// Generative model abstraction
///
/// The conversation pipeline talks to the model only through [`GenerativeModel`],
/// so the Gemini backend can be swapped out, or replaced by a scripted model in
/// tests, without touching prompt composition or response handling.
use crate::{error::ModelError, models::CitationFragment};

pub mod gemini;

pub use gemini::GeminiProvider;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
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

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A single generation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Behavioural instructions applied to the whole conversation
    pub system_instruction: Option<String>,
    /// Prior turns followed by the new user message
    pub turns: Vec<Turn>,
    /// Allow the model to ground its answer with web search
    pub web_search: bool,
}

impl GenerateRequest {
    /// A one-off prompt with no system contract, history or tools
    pub fn single(prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            turns: vec![Turn::user(prompt)],
            web_search: false,
        }
    }
}

/// Text and citations returned by the model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub text: String,
    pub citations: Vec<CitationFragment>,
}

impl ModelReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }
}

/// Trait for generative model backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Runs one generation call
    ///
    /// Implementations map transport and HTTP failures onto [`ModelError`] so the
    /// retry layer can tell transient failures from permanent ones.
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelReply, ModelError>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
