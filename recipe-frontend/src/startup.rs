//! Application startup and lifecycle management.

use crate::config::{AiProviderKind, RecipeConfig};
use crate::handlers::{
    app::{health_check, metrics},
    error::not_found_fallback,
    history::history_page,
    home::{home_page, suggest_recipe},
    recipe::{recipe_detail, simplify_recipe},
};
use crate::middleware::metrics_middleware;
use crate::services::providers::{
    CompletionParams, CompletionProvider, MockCompletionProvider, OpenRouterProvider,
};
use crate::services::{Database, RecipeAssistant};
use crate::AppState;
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{request_id, request_id_middleware, security_headers_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(home_page).post(suggest_recipe))
        .route("/recipe/:recipe_id", get(recipe_detail).post(simplify_recipe))
        .route("/history", get(history_page))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_fallback)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id(request.headers()),
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost so the trace span already sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Build the completion provider selected by configuration.
pub fn build_provider(config: &RecipeConfig) -> Result<Arc<dyn CompletionProvider>, AppError> {
    match config.ai.provider {
        AiProviderKind::OpenRouter => {
            let provider = OpenRouterProvider::new(&config.ai.openrouter)
                .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;
            tracing::info!(
                model = %provider.model(),
                base_url = %config.ai.openrouter.base_url,
                "Initialized OpenRouter provider"
            );
            Ok(Arc::new(provider))
        }
        AiProviderKind::Mock => {
            tracing::warn!("Using mock AI provider; suggestions are canned");
            Ok(Arc::new(MockCompletionProvider::new()))
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
    static_dir: String,
}

impl Application {
    /// Build the application with the provider named in `config`.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: RecipeConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            e
        })?;

        db.run_migrations().await.map_err(|e| {
            tracing::error!("Failed to run database migrations: {}", e);
            e
        })?;

        db.seed_if_empty().await?;

        let assistant = RecipeAssistant::new(
            provider,
            CompletionParams {
                temperature: config.ai.temperature,
                max_tokens: config.ai.max_tokens,
            },
        );

        let state = AppState::new(db, assistant);

        // Port 0 = random port for testing
        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("recipe-frontend listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
            static_dir: config.static_dir,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state, &self.static_dir);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
