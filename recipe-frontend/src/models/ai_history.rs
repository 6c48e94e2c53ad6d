//! AI interaction history model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use thiserror::Error;

/// Kind of AI interaction recorded in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Suggestion,
    Simplification,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Suggestion => "Suggestion",
            ActionType::Simplification => "Simplification",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown action type: {0}")]
pub struct UnknownActionType(pub String);

impl TryFrom<String> for ActionType {
    type Error = UnknownActionType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Suggestion" => Ok(ActionType::Suggestion),
            "Simplification" => Ok(ActionType::Simplification),
            _ => Err(UnknownActionType(value)),
        }
    }
}

/// One accepted AI interaction. Rows are insert-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AiHistory {
    pub id: i64,
    #[sqlx(try_from = "String")]
    pub action_type: ActionType,
    pub user_input: String,
    pub ai_output: String,
    pub created_utc: DateTime<Utc>,
}
