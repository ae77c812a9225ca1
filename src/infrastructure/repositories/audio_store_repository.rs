use async_trait::async_trait;

/// Repository for durable audio storage.
/// Abstracts the underlying object store (S3, GCS, ...)
#[async_trait]
pub trait AudioStoreRepository: Send + Sync {
    /// Upload MP3 bytes under the given key and return a stable public URL.
    ///
    /// Keys are namespaced by the caller (`narrations/...`) so audio objects
    /// are distinguishable from other asset types sharing the store. Uploads
    /// to an existing key overwrite it.
    ///
    /// # Errors
    /// Returns an error if the upload fails; nothing is persisted elsewhere
    /// on failure.
    async fn upload(&self, audio_data: Vec<u8>, key: &str) -> Result<String, String>;
}
