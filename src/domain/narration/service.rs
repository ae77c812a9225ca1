use super::dto::NarrationResponse;
use super::error::NarrationServiceError;
use super::script::build_script;
use crate::infrastructure::repositories::{
    AudioStoreRepository, RecipeRepository, SpeechRepository,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Storage key for a recipe's narration audio. Deterministic per recipe so
/// that concurrent generation races overwrite the same object instead of
/// accumulating duplicates.
pub fn audio_key(recipe_id: Uuid) -> String {
    format!("narrations/{}.mp3", recipe_id)
}

pub struct NarrationService {
    recipe_repo: Arc<dyn RecipeRepository>,
    speech_repo: Arc<dyn SpeechRepository>,
    audio_store: Arc<dyn AudioStoreRepository>,
}

impl NarrationService {
    pub fn new(
        recipe_repo: Arc<dyn RecipeRepository>,
        speech_repo: Arc<dyn SpeechRepository>,
        audio_store: Arc<dyn AudioStoreRepository>,
    ) -> Self {
        Self {
            recipe_repo,
            speech_repo,
            audio_store,
        }
    }
}

#[async_trait]
pub trait NarrationServiceApi: Send + Sync {
    /// Return the narration audio URL for a recipe, generating it on first
    /// request.
    ///
    /// This operation:
    /// - Returns the persisted URL immediately when one exists (no provider
    ///   calls - generation is expensive and must never repeat)
    /// - Otherwise builds the script (or validates the caller-supplied one),
    ///   synthesizes speech, uploads the audio, and persists the URL
    ///
    /// Exactly one durable write happens on the success path; none on any
    /// failure path, so a later retry starts from a clean slate. Concurrent
    /// cache misses may both generate; the deterministic storage key and the
    /// overwriting update make that last-writer-wins rather than incorrect,
    /// which is accepted instead of introducing locking.
    async fn get_or_create_narration(
        &self,
        recipe_id: Uuid,
        script_override: Option<String>,
    ) -> Result<NarrationResponse, NarrationServiceError>;
}

#[async_trait]
impl NarrationServiceApi for NarrationService {
    async fn get_or_create_narration(
        &self,
        recipe_id: Uuid,
        script_override: Option<String>,
    ) -> Result<NarrationResponse, NarrationServiceError> {
        tracing::info!(
            recipe_id = %recipe_id,
            has_script_override = script_override.is_some(),
            "Narration request"
        );

        let recipe = self
            .recipe_repo
            .find_by_id(recipe_id)
            .await
            .map_err(|e| NarrationServiceError::Dependency(e.to_string()))?
            .ok_or(NarrationServiceError::NotFound)?;

        if let Some(audio_url) = recipe.narration_audio_url.clone() {
            tracing::info!(
                recipe_id = %recipe_id,
                audio_url = %audio_url,
                "Narration cache hit - returning persisted URL"
            );
            return Ok(NarrationResponse { audio_url });
        }

        let script = match script_override {
            Some(script) if !script.trim().is_empty() => script,
            Some(_) => {
                return Err(NarrationServiceError::InvalidRecipe(
                    "narration script is empty".to_string(),
                ))
            }
            None => build_script(&recipe)
                .map_err(|e| NarrationServiceError::InvalidRecipe(e.to_string()))?,
        };

        tracing::info!(
            recipe_id = %recipe_id,
            script_length = script.len(),
            "Narration cache miss - generating audio"
        );

        let audio_data = self
            .speech_repo
            .synthesize(&script)
            .await
            .map_err(NarrationServiceError::GenerationFailed)?;

        let key = audio_key(recipe_id);
        let audio_url = self
            .audio_store
            .upload(audio_data, &key)
            .await
            .map_err(NarrationServiceError::GenerationFailed)?;

        self.recipe_repo
            .set_narration_url(recipe_id, &audio_url)
            .await
            .map_err(|e| NarrationServiceError::Dependency(e.to_string()))?;

        tracing::info!(
            recipe_id = %recipe_id,
            audio_url = %audio_url,
            "Narration generated and persisted"
        );

        Ok(NarrationResponse { audio_url })
    }
}
