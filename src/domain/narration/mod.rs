pub mod dto;
pub mod error;
pub mod script;
pub mod service;

pub use dto::{NarrationRequest, NarrationResponse};
pub use error::NarrationServiceError;
pub use script::{build_script, ScriptError};
pub use service::{audio_key, NarrationService, NarrationServiceApi};
