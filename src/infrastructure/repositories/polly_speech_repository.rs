use super::speech_repository::{split_into_batches, SpeechRepository};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use rand::seq::SliceRandom;
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// Interchangeable US English neural voices; one is picked at random per
/// narration so repeated recipes do not all sound identical.
const VOICES: [&str; 4] = ["Joanna", "Matthew", "Ruth", "Stephen"];

/// AWS Polly implementation of the speech repository
pub struct PollySpeechRepository {
    polly_client: Arc<PollyClient>,
}

impl PollySpeechRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    fn pick_voice() -> &'static str {
        VOICES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(VOICES[0])
    }

    /// Call AWS Polly to synthesize a single script batch
    async fn call_polly(&self, text: &str, voice_name: &str) -> Result<Vec<u8>, String> {
        let voice_id = VoiceId::from(voice_name);
        let engine = Engine::Neural;

        tracing::info!(
            voice = voice_name,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id.clone())
            .output_format(OutputFormat::Mp3)
            .engine(engine)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    voice_id = ?voice_id,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl SpeechRepository for PollySpeechRepository {
    async fn synthesize(&self, script: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        // One voice per narration, even when the script spans batches
        let voice = Self::pick_voice();

        let batches = split_into_batches(script, MAX_BATCH_SIZE);
        tracing::info!(
            voice = voice,
            batch_count = batches.len(),
            script_length = script.len(),
            "Script split into batches"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self.call_polly(batch, voice).await?;
            merged_audio.extend(audio_data);

            tracing::debug!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = script.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "Speech synthesis completed"
        );

        Ok(merged_audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_pick_a_voice_from_the_fixed_set() {
        for _ in 0..50 {
            let voice = PollySpeechRepository::pick_voice();
            assert!(VOICES.contains(&voice));
        }
    }
}
