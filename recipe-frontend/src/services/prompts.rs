//! Prompt templates for the recipe assistant.

/// Literal the model is told to answer with when an ingredient is not food.
pub const INVALID_INGREDIENTS_MARKER: &str = "INVALID_INGREDIENTS";

/// Prompt asking for one recipe built from `ingredients`.
pub fn render_suggest_prompt(ingredients: &str) -> String {
    format!(
        r#"You are a cooking assistant.

Rules:
- Only answer if every ingredient below is an edible food item.
- If the list contains anything that is not food (for example clothes, a phone or a chair),
reply with exactly:
"{marker}"

Ingredients:
{ingredients}

If every ingredient is edible:
- Suggest ONE recipe
- Give the recipe name
- Give 3-4 simple steps
"#,
        marker = INVALID_INGREDIENTS_MARKER,
        ingredients = ingredients,
    )
}

/// Prompt asking for a beginner-friendly rewrite of `instructions`.
pub fn render_simplify_prompt(instructions: &str) -> String {
    format!(
        "Simplify the following recipe instructions for beginners in easy language:\n\n{}",
        instructions
    )
}
