// Endpoint-level tests for the narration API.
//
// The router is driven directly through tower's `oneshot`, with the
// narration service wired to in-memory collaborators, so no database or
// speech provider is needed.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use recipe_narrator::controllers::narration::NarrationController;
use recipe_narrator::domain::narration::NarrationService;
use recipe_narrator::domain::recipe::{AdditionalInformation, Ingredient, Recipe};
use recipe_narrator::error::AppResult;
use recipe_narrator::infrastructure::http::build_router;
use recipe_narrator::infrastructure::repositories::{
    AudioStoreRepository, RecipeRepository, SpeechRepository,
};

struct InMemoryRecipeRepository {
    recipes: Mutex<HashMap<Uuid, Recipe>>,
}

impl InMemoryRecipeRepository {
    fn with(recipes: Vec<Recipe>) -> Arc<Self> {
        Arc::new(Self {
            recipes: Mutex::new(recipes.into_iter().map(|r| (r.id, r)).collect()),
        })
    }

    fn narration_url(&self, recipe_id: Uuid) -> Option<String> {
        self.recipes
            .lock()
            .get(&recipe_id)
            .and_then(|r| r.narration_audio_url.clone())
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn find_by_id(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        Ok(self.recipes.lock().get(&recipe_id).cloned())
    }

    async fn set_narration_url(&self, recipe_id: Uuid, url: &str) -> AppResult<()> {
        if let Some(recipe) = self.recipes.lock().get_mut(&recipe_id) {
            recipe.narration_audio_url = Some(url.to_string());
        }
        Ok(())
    }
}

struct StubSpeech {
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl SpeechRepository for StubSpeech {
    async fn synthesize(&self, _script: &str) -> Result<Vec<u8>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err("provider unavailable".to_string())
        } else {
            Ok(vec![0xff, 0xfb])
        }
    }
}

struct StubAudioStore;

#[async_trait]
impl AudioStoreRepository for StubAudioStore {
    async fn upload(&self, _audio_data: Vec<u8>, key: &str) -> Result<String, String> {
        Ok(format!("https://audio.example/{}", key))
    }
}

struct TestApp {
    router: axum::Router,
    recipes: Arc<InMemoryRecipeRepository>,
    speech: Arc<StubSpeech>,
}

fn recipe(id: Uuid) -> Recipe {
    Recipe {
        id,
        name: "Garlic Bread".to_string(),
        ingredients: vec![Ingredient {
            name: "baguette".to_string(),
            quantity: "1".to_string(),
        }],
        instructions: vec!["Toast it.".to_string()],
        additional_information: AdditionalInformation::default(),
        narration_audio_url: None,
        created_at: Utc::now(),
    }
}

fn test_app(recipes: Vec<Recipe>, speech_fails: bool) -> TestApp {
    let recipe_repo = InMemoryRecipeRepository::with(recipes);
    let speech = Arc::new(StubSpeech {
        fail: speech_fails,
        calls: AtomicUsize::new(0),
    });
    let service = Arc::new(NarrationService::new(
        recipe_repo.clone(),
        speech.clone(),
        Arc::new(StubAudioStore),
    ));
    let controller = Arc::new(NarrationController::new(service));

    // lazy pool: the health probe is not exercised in these tests
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://localhost:1/unused")
        .expect("lazy pool");

    TestApp {
        router: build_router(Arc::new(pool), controller),
        recipes: recipe_repo,
        speech,
    }
}

async fn post_narration(app: &TestApp, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/narrations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn it_should_generate_and_persist_a_narration_on_first_request() {
    let id = Uuid::new_v4();
    let app = test_app(vec![recipe(id)], false);

    let (status, body) = post_narration(&app, serde_json::json!({ "recipeId": id })).await;

    assert_eq!(status, StatusCode::OK);
    let expected = format!("https://audio.example/narrations/{}.mp3", id);
    assert_eq!(body["audioUrl"], expected.as_str());

    // the URL is now persisted on the recipe record
    assert_eq!(app.recipes.narration_url(id), Some(expected));
}

#[tokio::test]
async fn it_should_serve_repeat_requests_from_the_cache() {
    let id = Uuid::new_v4();
    let app = test_app(vec![recipe(id)], false);

    let (_, first) = post_narration(&app, serde_json::json!({ "recipeId": id })).await;
    let (status, second) = post_narration(&app, serde_json::json!({ "recipeId": id })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["audioUrl"], second["audioUrl"]);
    assert_eq!(app.speech.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn it_should_return_not_found_for_an_unknown_recipe() {
    let app = test_app(vec![], false);

    let (status, body) =
        post_narration(&app, serde_json::json!({ "recipeId": Uuid::new_v4() })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn it_should_reject_an_empty_script_override() {
    let id = Uuid::new_v4();
    let app = test_app(vec![recipe(id)], false);

    let (status, _) = post_narration(
        &app,
        serde_json::json!({ "recipeId": id, "script": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.speech.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_should_reject_an_oversized_script_override() {
    let id = Uuid::new_v4();
    let app = test_app(vec![recipe(id)], false);

    let (status, _) = post_narration(
        &app,
        serde_json::json!({ "recipeId": id, "script": "a".repeat(10_001) }),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn it_should_not_persist_anything_when_synthesis_fails() {
    let id = Uuid::new_v4();
    let app = test_app(vec![recipe(id)], true);

    let (status, _) = post_narration(&app, serde_json::json!({ "recipeId": id })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.recipes.narration_url(id), None);

    // the recipe is left retryable
    assert_eq!(app.speech.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn it_should_reject_an_invalid_recipe_without_calling_providers() {
    let id = Uuid::new_v4();
    let mut invalid = recipe(id);
    invalid.ingredients.clear();
    let app = test_app(vec![invalid], false);

    let (status, _) = post_narration(&app, serde_json::json!({ "recipeId": id })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.speech.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_should_attach_a_request_id_to_every_response() {
    let app = test_app(vec![], false);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
