pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use services::{Database, RecipeAssistant};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub assistant: RecipeAssistant,
}

impl AppState {
    pub fn new(db: Database, assistant: RecipeAssistant) -> Self {
        Self { db, assistant }
    }
}
