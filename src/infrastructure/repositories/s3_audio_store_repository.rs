use super::audio_store_repository::AudioStoreRepository;
use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use std::sync::Arc;

/// S3 implementation of the audio store
pub struct S3AudioStoreRepository {
    s3_client: Arc<S3Client>,
    bucket: String,
    region: String,
}

impl S3AudioStoreRepository {
    pub fn new(s3_client: Arc<S3Client>, bucket: String, region: String) -> Self {
        Self {
            s3_client,
            bucket,
            region,
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[async_trait]
impl AudioStoreRepository for S3AudioStoreRepository {
    async fn upload(&self, audio_data: Vec<u8>, key: &str) -> Result<String, String> {
        tracing::info!(
            bucket = %self.bucket,
            key = key,
            audio_size = audio_data.len(),
            "Uploading narration audio to S3"
        );

        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("audio/mpeg")
            .body(ByteStream::from(audio_data))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    bucket = %self.bucket,
                    key = key,
                    "S3 put_object failed"
                );
                format!("S3 upload error: {:?}", e)
            })?;

        let url = self.public_url(key);
        tracing::debug!(url = %url, "Narration audio uploaded");

        Ok(url)
    }
}
