//! AI gateway: turns recipe requests into completion calls.

use crate::services::metrics::{AI_REQUESTS_TOTAL, AI_REQUEST_DURATION};
use crate::services::prompts::{
    render_simplify_prompt, render_suggest_prompt, INVALID_INGREDIENTS_MARKER,
};
use crate::services::providers::{CompletionParams, CompletionProvider, ProviderError};
use std::sync::Arc;
use tracing::instrument;

/// Shown instead of the model's reply when it flags a non-edible ingredient.
pub const INVALID_INGREDIENTS_MESSAGE: &str =
    "❌ I can only suggest recipes using edible ingredients like vegetables, fruits, dairy, or meat.";

/// How a suggestion reply should be treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Accepted(String),
    /// The reply contained the invalid-ingredient marker somewhere.
    Rejected,
}

impl SuggestionOutcome {
    /// True when the marker appears anywhere in `response`.
    pub fn is_rejection(response: &str) -> bool {
        response.contains(INVALID_INGREDIENTS_MARKER)
    }

    pub fn from_response(response: String) -> Self {
        if Self::is_rejection(&response) {
            SuggestionOutcome::Rejected
        } else {
            SuggestionOutcome::Accepted(response)
        }
    }
}

/// Stateless front for the completion provider. Cheap to clone.
#[derive(Clone)]
pub struct RecipeAssistant {
    provider: Arc<dyn CompletionProvider>,
    params: CompletionParams,
}

impl RecipeAssistant {
    pub fn new(provider: Arc<dyn CompletionProvider>, params: CompletionParams) -> Self {
        Self { provider, params }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Ask for one recipe made from `ingredients`. The reply is trimmed.
    #[instrument(skip(self, ingredients))]
    pub async fn suggest_recipe(&self, ingredients: &str) -> Result<String, ProviderError> {
        let prompt = render_suggest_prompt(ingredients);
        let reply = self.complete("suggest", &prompt).await?;

        let outcome = if SuggestionOutcome::is_rejection(&reply) {
            "rejected"
        } else {
            "ok"
        };
        AI_REQUESTS_TOTAL
            .with_label_values(&["suggest", outcome])
            .inc();

        Ok(reply)
    }

    /// Ask for a beginner-friendly rewrite of `instructions`. The reply is trimmed.
    #[instrument(skip(self, instructions))]
    pub async fn simplify_recipe(&self, instructions: &str) -> Result<String, ProviderError> {
        let prompt = render_simplify_prompt(instructions);
        let reply = self.complete("simplify", &prompt).await?;

        AI_REQUESTS_TOTAL
            .with_label_values(&["simplify", "ok"])
            .inc();

        Ok(reply)
    }

    async fn complete(&self, operation: &str, prompt: &str) -> Result<String, ProviderError> {
        let timer = AI_REQUEST_DURATION
            .with_label_values(&[operation])
            .start_timer();

        let result = self.provider.complete(prompt, &self.params).await;
        timer.observe_duration();

        match result {
            Ok(reply) => Ok(reply.trim().to_string()),
            Err(e) => {
                tracing::error!(operation = operation, error = %e, "AI completion failed");
                AI_REQUESTS_TOTAL
                    .with_label_values(&[operation, "error"])
                    .inc();
                Err(e)
            }
        }
    }
}
