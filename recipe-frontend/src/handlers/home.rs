use crate::handlers::PageError;
use crate::models::{ActionType, Recipe};
use crate::services::metrics::HISTORY_RECORDS_TOTAL;
use crate::services::{SuggestionOutcome, INVALID_INGREDIENTS_MESSAGE};
use crate::AppState;
use askama::Template;
use axum::extract::{rejection::FormRejection, State};
use axum::Form;
use serde::Deserialize;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub recipes: Vec<Recipe>,
    pub ai_result: Option<String>,
    /// Echoed back into the form after a submission.
    pub ingredients: String,
}

/// The ingredient text is passed to the assistant as typed; only a missing
/// field is rejected.
#[derive(Debug, Deserialize)]
pub struct SuggestForm {
    pub ingredients: String,
}

pub async fn home_page(State(state): State<AppState>) -> Result<IndexTemplate, PageError> {
    let recipes = state.db.list_recipes().await?;

    Ok(IndexTemplate {
        recipes,
        ai_result: None,
        ingredients: String::new(),
    })
}

/// Suggest a recipe from the submitted ingredient list.
///
/// A reply carrying the invalid-ingredient marker is replaced by a fixed
/// message and leaves the history untouched.
pub async fn suggest_recipe(
    State(state): State<AppState>,
    form: Result<Form<SuggestForm>, FormRejection>,
) -> Result<IndexTemplate, PageError> {
    let Form(form) = form.map_err(|e| PageError::bad_request(e.body_text()))?;

    let recipes = state.db.list_recipes().await?;

    let reply = state.assistant.suggest_recipe(&form.ingredients).await?;

    let ai_result = match SuggestionOutcome::from_response(reply) {
        SuggestionOutcome::Rejected => {
            tracing::info!("Suggestion rejected: non-edible ingredients");
            INVALID_INGREDIENTS_MESSAGE.to_string()
        }
        SuggestionOutcome::Accepted(text) => {
            state
                .db
                .append_history(ActionType::Suggestion, &form.ingredients, &text)
                .await?;
            HISTORY_RECORDS_TOTAL
                .with_label_values(&[ActionType::Suggestion.as_str()])
                .inc();
            text
        }
    };

    Ok(IndexTemplate {
        recipes,
        ai_result: Some(ai_result),
        ingredients: form.ingredients,
    })
}
