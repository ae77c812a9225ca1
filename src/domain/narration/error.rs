use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum NarrationServiceError {
    #[error("recipe not found")]
    NotFound,
    #[error("invalid recipe: {0}")]
    InvalidRecipe(String),
    #[error("narration generation failed: {0}")]
    GenerationFailed(String),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<NarrationServiceError> for AppError {
    fn from(err: NarrationServiceError) -> Self {
        match err {
            NarrationServiceError::NotFound => AppError::NotFound("Recipe not found".to_string()),
            NarrationServiceError::InvalidRecipe(msg) => AppError::BadRequest(msg),
            NarrationServiceError::GenerationFailed(msg) => AppError::ExternalService(msg),
            NarrationServiceError::Dependency(msg) => AppError::Internal(msg),
            NarrationServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
