use super::controller::PlaybackErrorKind;
use crate::domain::narration::{NarrationRequest, NarrationResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

/// Client view of the narration generation endpoint.
#[async_trait]
pub trait NarrationClient: Send + Sync {
    /// Obtain the narration audio URL for a recipe, generating it server-side
    /// on first request. Failures map onto terminal playback error kinds.
    async fn generate(
        &self,
        recipe_id: Uuid,
        script_override: Option<String>,
    ) -> Result<String, PlaybackErrorKind>;
}

/// HTTP implementation talking to POST /api/narrations
pub struct HttpNarrationClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpNarrationClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl NarrationClient for HttpNarrationClient {
    async fn generate(
        &self,
        recipe_id: Uuid,
        script_override: Option<String>,
    ) -> Result<String, PlaybackErrorKind> {
        let request = NarrationRequest {
            recipe_id,
            script: script_override,
        };

        let response = self
            .http
            .post(format!("{}/api/narrations", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    recipe_id = %recipe_id,
                    error = %e,
                    "Narration request failed to reach the server"
                );
                PlaybackErrorKind::GenerationFailed
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            let body: NarrationResponse = response.json().await.map_err(|e| {
                tracing::error!(recipe_id = %recipe_id, error = %e, "Malformed narration response");
                PlaybackErrorKind::GenerationFailed
            })?;
            return Ok(body.audio_url);
        }

        tracing::warn!(
            recipe_id = %recipe_id,
            status = %status.as_u16(),
            "Narration generation rejected"
        );

        // The endpoint encodes the error taxonomy in the status code
        match status {
            StatusCode::NOT_FOUND => Err(PlaybackErrorKind::NotFound),
            StatusCode::BAD_REQUEST | StatusCode::PAYLOAD_TOO_LARGE => {
                Err(PlaybackErrorKind::InvalidRecipe)
            }
            _ => Err(PlaybackErrorKind::GenerationFailed),
        }
    }
}
