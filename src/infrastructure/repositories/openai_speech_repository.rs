use super::speech_repository::{split_into_batches, SpeechRepository};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

const VOICES: [Voice; 4] = [Voice::Alloy, Voice::Echo, Voice::Nova, Voice::Shimmer];

/// OpenAI TTS implementation of the speech repository
pub struct OpenAiSpeechRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiSpeechRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    fn pick_voice() -> Voice {
        VOICES
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or(Voice::Alloy)
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    /// Call the OpenAI TTS API to synthesize a single script batch
    async fn call_openai(&self, text: &str, voice: Voice) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = %self.model,
            voice = ?voice,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice,
            response_format: None, // Defaults to MP3
            speed: None,           // Defaults to 1.0
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        Ok(response.bytes.to_vec())
    }
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    async fn synthesize(&self, script: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();
        let voice = Self::pick_voice();

        let batches = split_into_batches(script, MAX_BATCH_SIZE);
        tracing::info!(
            voice = ?voice,
            batch_count = batches.len(),
            script_length = script.len(),
            "Script split into batches"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self.call_openai(batch, voice.clone()).await?;
            merged_audio.extend(audio_data);

            tracing::debug!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        tracing::info!(
            provider = "openai",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = script.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "Speech synthesis completed"
        );

        Ok(merged_audio)
    }
}
