use recipe_narrator::infrastructure::config::{Config, LogFormat, SpeechProvider};
use recipe_narrator::infrastructure::db::{check_connection, create_pool};
use recipe_narrator::infrastructure::http::start_http_server;
use recipe_narrator::infrastructure::repositories::{
    OpenAiSpeechRepository, PgRecipeRepository, PollySpeechRepository, S3AudioStoreRepository,
    SpeechRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Recipe Narrator on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    // AWS clients (Polly for synthesis, S3 for audio storage)
    tracing::info!("Loading AWS configuration for region: {}", config.aws_region);
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let recipe_repo = Arc::new(PgRecipeRepository::new(pool.clone()));

    let speech_repo: Arc<dyn SpeechRepository> = match config.speech_provider {
        SpeechProvider::Polly => {
            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            tracing::info!("Using AWS Polly for speech synthesis");
            Arc::new(PollySpeechRepository::new(polly_client))
        }
        SpeechProvider::OpenAi => {
            // API key comes from OPENAI_API_KEY
            let openai_client = Arc::new(async_openai::Client::new());
            tracing::info!(model = %config.openai_tts_model, "Using OpenAI for speech synthesis");
            Arc::new(OpenAiSpeechRepository::new(
                openai_client,
                config.openai_tts_model.clone(),
            ))
        }
    };

    let s3_client = Arc::new(aws_sdk_s3::Client::new(&aws_config));
    let audio_store = Arc::new(S3AudioStoreRepository::new(
        s3_client,
        config.audio_bucket.clone(),
        config.aws_region.clone(),
    ));

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let narration_service = Arc::new(recipe_narrator::domain::narration::NarrationService::new(
        recipe_repo,
        speech_repo,
        audio_store,
    ));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let narration_controller = Arc::new(
        recipe_narrator::controllers::narration::NarrationController::new(narration_service),
    );

    // Start HTTP server with all routes
    start_http_server(pool, config, narration_controller).await?;

    Ok(())
}

/// RUST_LOG wins when set; otherwise development gets debug-level
/// logging and production info-level.
fn default_log_filter(config: &Config) -> &'static str {
    if config.is_development() {
        "recipe_narrator=debug,tower_http=debug"
    } else {
        "recipe_narrator=info,tower_http=info"
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_log_filter(config).into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
