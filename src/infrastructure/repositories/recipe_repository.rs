use crate::domain::recipe::Recipe;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// The slice of recipe storage the narration pipeline needs. The CRUD layer
/// owns the rest of the recipe lifecycle.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>>;

    /// Persist the narration audio URL. A plain overwrite: concurrent
    /// generations for the same recipe resolve last-writer-wins.
    async fn set_narration_url(&self, recipe_id: Uuid, url: &str) -> AppResult<()>;
}

/// Postgres implementation of the recipe repository
pub struct PgRecipeRepository {
    pool: Arc<DbPool>,
}

impl PgRecipeRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn find_by_id(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        let pool = self.pool.as_ref();
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, ingredients, instructions, additional_information,
                   narration_audio_url, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?;

        Ok(recipe)
    }

    async fn set_narration_url(&self, recipe_id: Uuid, url: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            UPDATE recipes
            SET narration_audio_url = $1
            WHERE id = $2
            "#,
        )
        .bind(url)
        .bind(recipe_id)
        .execute(pool)
        .await?;

        Ok(())
    }
}
