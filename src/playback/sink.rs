use async_trait::async_trait;

/// The audio primitive a playback context owns exclusively (a browser audio
/// element, a native output device, ...). The controller is its only writer.
#[async_trait]
pub trait AudioSink: Send + Sync {
    /// Begin preloading `url`. Resolves once the source can play through,
    /// or with an error if loading fails.
    async fn preload(&self, url: &str) -> Result<(), String>;

    /// Start playback of the preloaded source. May be rejected, e.g. by an
    /// autoplay policy.
    async fn play(&self) -> Result<(), String>;

    /// Resolves when playback reaches its natural end.
    async fn ended(&self);

    /// Pause and release the current source. Synchronous, must not depend on
    /// any in-flight operation completing, and safe to call repeatedly.
    fn stop(&self);
}
