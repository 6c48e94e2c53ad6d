//! HTML error pages.

use crate::services::providers::ProviderError;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use service_core::error::AppError;

#[derive(Template)]
#[template(path = "400.html")]
pub struct BadRequestTemplate {
    pub message: String,
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub message: String,
}

#[derive(Template)]
#[template(path = "500.html")]
pub struct ServerErrorTemplate {
    pub message: String,
}

/// Handler error rendered as one of the 400/404/500 pages.
///
/// Every status other than 400 and 404 collapses into the 500 page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl PageError {
    pub fn not_found(message: impl Into<String>) -> Self {
        PageError(AppError::NotFound(anyhow::anyhow!(message.into())))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        PageError(AppError::BadRequest(anyhow::anyhow!(message.into())))
    }
}

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl From<ProviderError> for PageError {
    fn from(err: ProviderError) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let message = self.0.public_message();

        let (status, rendered) = match self.0.status_code() {
            StatusCode::BAD_REQUEST => {
                tracing::warn!(error = %self.0, "Bad request");
                (
                    StatusCode::BAD_REQUEST,
                    BadRequestTemplate { message }.render(),
                )
            }
            StatusCode::NOT_FOUND => {
                tracing::info!(error = %self.0, "Not found");
                (StatusCode::NOT_FOUND, NotFoundTemplate { message }.render())
            }
            _ => {
                tracing::error!(error = %self.0, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ServerErrorTemplate { message }.render(),
                )
            }
        };

        match rendered {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, status.canonical_reason().unwrap_or("Error")).into_response()
            }
        }
    }
}

/// Fallback for routes that do not exist.
pub async fn not_found_fallback() -> PageError {
    PageError::not_found("The page you are looking for does not exist.")
}
