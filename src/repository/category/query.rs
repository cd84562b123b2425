use crate::{
    abstract_trait::CategoryQueryRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::Category as CategoryModel,
};
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct CategoryQueryRepository {
    db: ConnectionPool,
}

impl CategoryQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryQueryRepositoryTrait for CategoryQueryRepository {
    async fn find_all(&self) -> Result<Vec<CategoryModel>, RepositoryError> {
        let categories = sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT category_id, name, created_at
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch categories: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(categories)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<CategoryModel>, RepositoryError> {
        let category = sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT category_id, name, created_at
            FROM categories
            WHERE lower(name) = lower($1)
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch category '{}': {:?}", name, e);
            RepositoryError::from(e)
        })?;

        Ok(category)
    }
}
