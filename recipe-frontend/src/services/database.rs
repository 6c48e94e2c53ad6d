//! Database service for recipe-frontend.
//!
//! Owns the SQLite pool and every query against the `recipes` and
//! `ai_history` tables.

use crate::models::{ActionType, AiHistory, Recipe};
use crate::services::metrics::DB_QUERY_DURATION;
use chrono::Utc;
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool.
    ///
    /// An in-memory database lives inside a single connection, so the pool is
    /// pinned to exactly one connection that is never recycled.
    #[instrument(skip(database_url), fields(service = "recipe-frontend"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true);

        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(600))
        };

        info!(
            in_memory = in_memory,
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to SQLite"
        );

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("SQLite connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Create the schema if it does not exist yet.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Recipe Operations
    // -------------------------------------------------------------------------

    /// Insert the sample recipe when the table is empty.
    ///
    /// Returns `true` when a row was written.
    #[instrument(skip(self))]
    pub async fn seed_if_empty(&self) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["seed_if_empty"])
            .start_timer();

        let mut tx = self.pool.begin().await?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to count recipes: {}", e)))?;

        if count > 0 {
            tx.rollback().await?;
            timer.observe_duration();
            return Ok(false);
        }

        let recipe = Recipe::sample();
        sqlx::query(
            r#"
            INSERT INTO recipes (id, name, cuisine, is_vegetarian, prep_time_minutes, ingredients, difficulty, instructions, tags)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&recipe.id)
        .bind(&recipe.name)
        .bind(&recipe.cuisine)
        .bind(recipe.is_vegetarian)
        .bind(recipe.prep_time_minutes)
        .bind(&recipe.ingredients)
        .bind(&recipe.difficulty)
        .bind(&recipe.instructions)
        .bind(&recipe.tags)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to seed recipe: {}", e)))?;

        tx.commit().await?;
        timer.observe_duration();

        info!(recipe_id = %recipe.id, "Seeded sample recipe");

        Ok(true)
    }

    /// List every recipe.
    #[instrument(skip(self))]
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_recipes"])
            .start_timer();

        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, cuisine, is_vegetarian, prep_time_minutes, ingredients, difficulty, instructions, tags
            FROM recipes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list recipes: {}", e)))?;

        timer.observe_duration();

        Ok(recipes)
    }

    /// Get a recipe by ID.
    #[instrument(skip(self))]
    pub async fn get_recipe(&self, recipe_id: &str) -> Result<Option<Recipe>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_recipe"])
            .start_timer();

        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, cuisine, is_vegetarian, prep_time_minutes, ingredients, difficulty, instructions, tags
            FROM recipes
            WHERE id = ?1
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get recipe: {}", e)))?;

        timer.observe_duration();

        Ok(recipe)
    }

    // -------------------------------------------------------------------------
    // AI History Operations
    // -------------------------------------------------------------------------

    /// Append one history record and return the stored row.
    #[instrument(skip(self, user_input, ai_output))]
    pub async fn append_history(
        &self,
        action_type: ActionType,
        user_input: &str,
        ai_output: &str,
    ) -> Result<AiHistory, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["append_history"])
            .start_timer();

        let entry = sqlx::query_as::<_, AiHistory>(
            r#"
            INSERT INTO ai_history (action_type, user_input, ai_output, created_utc)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, action_type, user_input, ai_output, created_utc
            "#,
        )
        .bind(action_type.as_str())
        .bind(user_input)
        .bind(ai_output)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to append history: {}", e)))?;

        timer.observe_duration();

        info!(history_id = entry.id, "AI history recorded");

        Ok(entry)
    }

    /// List every history record, most recent first.
    #[instrument(skip(self))]
    pub async fn list_history(&self) -> Result<Vec<AiHistory>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_history"])
            .start_timer();

        let entries = sqlx::query_as::<_, AiHistory>(
            r#"
            SELECT id, action_type, user_input, ai_output, created_utc
            FROM ai_history
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list history: {}", e)))?;

        timer.observe_duration();

        Ok(entries)
    }

    /// Number of history records.
    #[instrument(skip(self))]
    pub async fn count_history(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ai_history")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to count history: {}", e)))?;
        Ok(count)
    }
}
