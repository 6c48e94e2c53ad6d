use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default OpenRouter base URL.
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default chat-completion model.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

const DEFAULT_TEMPERATURE: f32 = 0.4;
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct RecipeConfig {
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub ai: AiConfig,
    pub observability: ObservabilityConfig,
    /// Directory served under `/static`.
    pub static_dir: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL, e.g. `sqlite://recipes.db` or `sqlite::memory:`.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Which completion backend the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProviderKind {
    OpenRouter,
    Mock,
}

impl AiProviderKind {
    fn parse(value: &str) -> Result<Self, AppError> {
        match value.to_ascii_lowercase().as_str() {
            "openrouter" => Ok(AiProviderKind::OpenRouter),
            "mock" => Ok(AiProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "AI_PROVIDER must be 'openrouter' or 'mock', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: AiProviderKind,
    pub openrouter: OpenRouterConfig,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl RecipeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let provider = AiProviderKind::parse(&get_env("AI_PROVIDER", Some("openrouter"), is_prod)?)?;

        // The key is only mandatory when the real provider is selected.
        let api_key = match provider {
            AiProviderKind::OpenRouter => get_env("OPENROUTER_API_KEY", None, is_prod)?,
            AiProviderKind::Mock => env::var("OPENROUTER_API_KEY").unwrap_or_default(),
        };

        Ok(RecipeConfig {
            common: common_config,
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", Some("sqlite::memory:"), is_prod)?,
                max_connections: get_env("DATABASE_MAX_CONNECTIONS", Some("5"), is_prod)?
                    .parse()
                    .unwrap_or(5),
                min_connections: get_env("DATABASE_MIN_CONNECTIONS", Some("1"), is_prod)?
                    .parse()
                    .unwrap_or(1),
            },
            ai: AiConfig {
                provider,
                openrouter: OpenRouterConfig {
                    api_key: Secret::new(api_key),
                    base_url: get_env(
                        "OPENROUTER_BASE_URL",
                        Some(DEFAULT_OPENROUTER_BASE_URL),
                        is_prod,
                    )?,
                    model: get_env("OPENROUTER_MODEL", Some(DEFAULT_MODEL), is_prod)?,
                    request_timeout_secs: get_env(
                        "AI_REQUEST_TIMEOUT_SECS",
                        Some(&DEFAULT_REQUEST_TIMEOUT_SECS.to_string()),
                        is_prod,
                    )?
                    .parse()
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
                },
                temperature: get_env(
                    "AI_TEMPERATURE",
                    Some(&DEFAULT_TEMPERATURE.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_TEMPERATURE),
                max_tokens: get_env("AI_MAX_TOKENS", Some(&DEFAULT_MAX_TOKENS.to_string()), is_prod)?
                    .parse()
                    .unwrap_or(DEFAULT_MAX_TOKENS),
            },
            observability: ObservabilityConfig {
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| default_static_dir()),
        })
    }

    /// Configuration for running against an in-memory database and the mock
    /// provider on a random port.
    pub fn for_tests() -> Self {
        RecipeConfig {
            common: core_config::Config {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
            },
            ai: AiConfig {
                provider: AiProviderKind::Mock,
                openrouter: OpenRouterConfig {
                    api_key: Secret::new(String::new()),
                    base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
                    model: DEFAULT_MODEL.to_string(),
                    request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                },
                temperature: DEFAULT_TEMPERATURE,
                max_tokens: DEFAULT_MAX_TOKENS,
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                otlp_endpoint: None,
            },
            static_dir: default_static_dir(),
        }
    }
}

fn default_static_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
