pub mod audio_store_repository;
pub mod openai_speech_repository;
pub mod polly_speech_repository;
pub mod recipe_repository;
pub mod s3_audio_store_repository;
pub mod speech_repository;

pub use audio_store_repository::AudioStoreRepository;
pub use openai_speech_repository::OpenAiSpeechRepository;
pub use polly_speech_repository::PollySpeechRepository;
pub use recipe_repository::{PgRecipeRepository, RecipeRepository};
pub use s3_audio_store_repository::S3AudioStoreRepository;
pub use speech_repository::SpeechRepository;
