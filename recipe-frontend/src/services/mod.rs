//! Services module for recipe-frontend.

pub mod assistant;
pub mod database;
pub mod metrics;
pub mod prompts;
pub mod providers;

pub use assistant::{RecipeAssistant, SuggestionOutcome, INVALID_INGREDIENTS_MESSAGE};
pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
