use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::narration::{NarrationRequest, NarrationResponse, NarrationService, NarrationServiceApi},
    error::{AppError, AppResult},
};

/// Overrides longer than this are rejected before any provider call
const MAX_SCRIPT_LENGTH: usize = 10_000;

pub struct NarrationController {
    narration_service: Arc<NarrationService>,
}

impl NarrationController {
    pub fn new(narration_service: Arc<NarrationService>) -> Self {
        Self { narration_service }
    }

    /// POST /api/narrations - Return the recipe's narration audio URL,
    /// generating and caching it on first request
    pub async fn generate(
        State(controller): State<Arc<NarrationController>>,
        Json(request): Json<NarrationRequest>,
    ) -> AppResult<Json<NarrationResponse>> {
        // Validate a caller-supplied script before touching the service
        if let Some(script) = &request.script {
            if script.trim().is_empty() {
                return Err(AppError::BadRequest("Script cannot be empty".to_string()));
            }
            if script.len() > MAX_SCRIPT_LENGTH {
                return Err(AppError::PayloadTooLarge(
                    "Script must be 10,000 characters or less".to_string(),
                ));
            }
        }

        let response = controller
            .narration_service
            .get_or_create_narration(request.recipe_id, request.script)
            .await
            .map_err(AppError::from)?;

        Ok(Json(response))
    }
}
