use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/narrations
///
/// `script` lets the client supply a locally assembled narration script
/// instead of having the server derive one from the recipe. Either way the
/// cached result is keyed purely by recipe id.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationRequest {
    pub recipe_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// Response for POST /api/narrations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationResponse {
    pub audio_url: String,
}
