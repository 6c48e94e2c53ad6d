mod common;

use common::TestApp;
use recipe_frontend::models::ActionType;
use recipe_frontend::services::providers::MockCompletionProvider;

const REJECTION: &str =
    "I can only suggest recipes using edible ingredients like vegetables, fruits, dairy, or meat.";

#[tokio::test]
async fn home_page_lists_seeded_recipe() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Paneer Butter Masala"));
    assert!(body.contains("/recipe/rec_101"));
    assert!(!body.contains("ai-result"));
}

#[tokio::test]
async fn suggestion_is_shown_and_recorded() {
    let provider = MockCompletionProvider::with_reply(
        "  Tomato Paneer Curry\n1. Chop tomatoes.\n2. Fry paneer.\n3. Simmer together.\n",
    );
    let app = TestApp::spawn_with_provider(provider).await;

    let response = app
        .post_form("/", &[("ingredients", "paneer, tomato")])
        .await;

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Tomato Paneer Curry\n1. Chop tomatoes."));
    assert!(body.contains("Paneer Butter Masala"));

    let history = app.db.list_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action_type, ActionType::Suggestion);
    assert_eq!(history[0].user_input, "paneer, tomato");
    assert_eq!(
        history[0].ai_output,
        "Tomato Paneer Curry\n1. Chop tomatoes.\n2. Fry paneer.\n3. Simmer together."
    );

    let prompts = app.provider.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("paneer, tomato"));
}

#[tokio::test]
async fn non_edible_ingredients_are_rejected_without_history() {
    let provider = MockCompletionProvider::with_reply("INVALID_INGREDIENTS");
    let app = TestApp::spawn_with_provider(provider).await;

    let response = app.post_form("/", &[("ingredients", "phone, chair")]).await;

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains(REJECTION));
    assert!(!body.contains("INVALID_INGREDIENTS"));

    assert_eq!(app.db.count_history().await.unwrap(), 0);
}

#[tokio::test]
async fn marker_inside_longer_reply_still_rejects() {
    let provider =
        MockCompletionProvider::with_reply("Sorry, INVALID_INGREDIENTS: a phone is not food.");
    let app = TestApp::spawn_with_provider(provider).await;

    let response = app.post_form("/", &[("ingredients", "rice, phone")]).await;

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains(REJECTION));
    assert_eq!(app.db.count_history().await.unwrap(), 0);
}

#[tokio::test]
async fn blank_ingredients_are_forwarded_to_the_assistant() {
    let provider = MockCompletionProvider::with_reply("INVALID_INGREDIENTS");
    let app = TestApp::spawn_with_provider(provider).await;

    let response = app.post_form("/", &[("ingredients", "   ")]).await;

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains(REJECTION));

    let prompts = app.provider.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Ingredients:\n   \n"));
    assert_eq!(app.db.count_history().await.unwrap(), 0);
}

#[tokio::test]
async fn empty_ingredients_with_a_reply_are_recorded_as_typed() {
    let provider = MockCompletionProvider::with_reply("Plain Rice\n1. Boil rice.");
    let app = TestApp::spawn_with_provider(provider).await;

    let response = app.post_form("/", &[("ingredients", "")]).await;

    assert_eq!(response.status(), 200);
    let history = app.db.list_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user_input, "");
    assert_eq!(history[0].ai_output, "Plain Rice\n1. Boil rice.");
}

#[tokio::test]
async fn missing_ingredients_field_returns_bad_request() {
    let app = TestApp::spawn().await;

    let response = app.post_empty("/").await;

    assert_eq!(response.status(), 400);
    assert!(app.provider.prompts().await.is_empty());
}

#[tokio::test]
async fn provider_failure_renders_server_error_page() {
    let provider = MockCompletionProvider::failing("OpenRouter API error 500: upstream down");
    let app = TestApp::spawn_with_provider(provider).await;

    let response = app.post_form("/", &[("ingredients", "rice, dal")]).await;

    assert_eq!(response.status(), 500);
    let body = response.text().await.unwrap();
    assert!(body.contains("500 · Something went wrong"));
    assert!(!body.contains("upstream down"));
    assert_eq!(app.db.count_history().await.unwrap(), 0);
}
