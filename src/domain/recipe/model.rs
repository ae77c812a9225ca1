use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Subset of the recipe record relevant to narration. The CRUD layer owns
/// everything else; the narration service only reads content and writes
/// `narration_audio_url`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    #[sqlx(json)]
    pub ingredients: Vec<Ingredient>,
    #[sqlx(json)]
    pub instructions: Vec<String>,
    #[sqlx(json)]
    pub additional_information: AdditionalInformation,
    pub narration_audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_suggestions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_information: Option<String>,
}
