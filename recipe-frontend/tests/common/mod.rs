#![allow(dead_code)]

use recipe_frontend::config::RecipeConfig;
use recipe_frontend::services::providers::MockCompletionProvider;
use recipe_frontend::services::Database;
use recipe_frontend::startup::Application;
use std::sync::Arc;

pub const SAMPLE_RECIPE_ID: &str = "rec_101";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: Database,
    pub provider: Arc<MockCompletionProvider>,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the app on a random port with a fresh in-memory store and the
    /// default canned mock provider.
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(MockCompletionProvider::new()).await
    }

    pub async fn spawn_with_provider(provider: MockCompletionProvider) -> Self {
        let provider = Arc::new(provider);
        let config = RecipeConfig::for_tests();

        let app = Application::build_with_provider(config, provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        // Wait for the server to accept connections
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            provider,
            client,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_empty(&self, path: &str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .send()
            .await
            .expect("Failed to execute request")
    }
}
