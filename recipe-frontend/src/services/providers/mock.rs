//! Mock provider implementation for tests and offline development.

use super::{CompletionParams, CompletionProvider, ProviderError};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
enum Script {
    /// Echo a canned answer that names the prompt length.
    Canned,
    Reply(String),
    Fail(String),
}

/// In-process completion provider.
///
/// Records every prompt it receives so callers can assert on what would have
/// been sent upstream.
pub struct MockCompletionProvider {
    script: Mutex<Script>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self::with_script(Script::Canned)
    }

    /// Always answer with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(reply.into()))
    }

    /// Always fail as an upstream API error with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(message.into()))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub async fn set_reply(&self, reply: impl Into<String>) {
        *self.script.lock().await = Script::Reply(reply.into());
    }

    pub async fn set_failure(&self, message: impl Into<String>) {
        *self.script.lock().await = Script::Fail(message.into());
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        prompt: &str,
        _params: &CompletionParams,
    ) -> Result<String, ProviderError> {
        self.prompts.lock().await.push(prompt.to_string());

        match self.script.lock().await.clone() {
            Script::Canned => Ok(format!(
                "Mock Recipe\n1. Read the {}-character prompt.\n2. Cook.\n3. Serve.",
                prompt.len()
            )),
            Script::Reply(reply) => Ok(reply),
            Script::Fail(message) => Err(ProviderError::ApiError(message)),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
