use crate::handlers::PageError;
use crate::models::{ActionType, Recipe};
use crate::services::metrics::HISTORY_RECORDS_TOTAL;
use crate::AppState;
use askama::Template;
use axum::extract::{Path, State};

#[derive(Template)]
#[template(path = "recipe_detail.html")]
pub struct RecipeDetailTemplate {
    pub recipe: Recipe,
    pub simplified: Option<String>,
}

async fn load_recipe(state: &AppState, recipe_id: &str) -> Result<Recipe, PageError> {
    state
        .db
        .get_recipe(recipe_id)
        .await?
        .ok_or_else(|| PageError::not_found(format!("Recipe '{}' was not found.", recipe_id)))
}

pub async fn recipe_detail(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<RecipeDetailTemplate, PageError> {
    let recipe = load_recipe(&state, &recipe_id).await?;

    Ok(RecipeDetailTemplate {
        recipe,
        simplified: None,
    })
}

/// Rewrite the recipe's instructions for beginners. Every successful call is
/// logged to the history under the recipe's name.
pub async fn simplify_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<RecipeDetailTemplate, PageError> {
    let recipe = load_recipe(&state, &recipe_id).await?;

    let simplified = state.assistant.simplify_recipe(&recipe.instructions).await?;

    state
        .db
        .append_history(ActionType::Simplification, &recipe.name, &simplified)
        .await?;
    HISTORY_RECORDS_TOTAL
        .with_label_values(&[ActionType::Simplification.as_str()])
        .inc();

    tracing::info!(recipe_id = %recipe.id, "Recipe simplified");

    Ok(RecipeDetailTemplate {
        recipe,
        simplified: Some(simplified),
    })
}
