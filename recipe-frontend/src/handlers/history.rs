use crate::handlers::PageError;
use crate::models::AiHistory;
use crate::AppState;
use askama::Template;
use axum::extract::State;

#[derive(Template)]
#[template(path = "history.html")]
pub struct HistoryTemplate {
    pub entries: Vec<AiHistory>,
}

pub async fn history_page(State(state): State<AppState>) -> Result<HistoryTemplate, PageError> {
    let entries = state.db.list_history().await?;
    Ok(HistoryTemplate { entries })
}
