//! Client-side narration playback.
//!
//! The [`controller::PlaybackController`] owns at most one live audio
//! session per playback context, driving an [`sink::AudioSink`] through
//! preload, play and completion, and calling the narration endpoint via a
//! [`client::NarrationClient`] when the recipe has no cached audio URL yet.

pub mod client;
pub mod controller;
pub mod sink;

pub use client::{HttpNarrationClient, NarrationClient};
pub use controller::{
    OnEnded, PlaybackController, PlaybackErrorKind, PlaybackSession, PlaybackStatus,
};
pub use sink::AudioSink;
