//! Chat-completion provider abstractions and implementations.
//!
//! The gateway only needs "prompt in, text out", so the trait is deliberately
//! narrow. Backends: OpenRouter over HTTP, and an in-process mock.

pub mod mock;
pub mod openrouter;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

pub use mock::MockCompletionProvider;
pub use openrouter::OpenRouterProvider;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::BadGateway(err.to_string())
    }
}

/// Generation parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_tokens: 500,
        }
    }
}

/// A hosted (or fake) chat-completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `prompt` as a single user message and return the raw reply text.
    async fn complete(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<String, ProviderError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
