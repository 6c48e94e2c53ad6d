//! Domain models for recipe-frontend.

mod ai_history;
mod recipe;

pub use ai_history::{ActionType, AiHistory};
pub use recipe::Recipe;
