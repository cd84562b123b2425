use crate::{
    abstract_trait::CategoryCommandRepositoryTrait, config::ConnectionPool,
    domain::requests::CreateCategoryRequest, errors::RepositoryError,
    model::Category as CategoryModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct CategoryCommandRepository {
    db: ConnectionPool,
}

impl CategoryCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryCommandRepositoryTrait for CategoryCommandRepository {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError> {
        let category = sqlx::query_as::<_, CategoryModel>(
            r#"
            INSERT INTO categories (name, created_at)
            VALUES ($1, current_timestamp)
            RETURNING category_id, name, created_at
            "#,
        )
        .bind(&req.name)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create category {}: {:?}", req.name, err);
            // 23505 from the lower(name) unique index becomes AlreadyExists
            // so resolve-or-create can re-resolve instead of aborting.
            RepositoryError::from_sqlx(err, &req.name)
        })?;

        info!(
            "✅ Created category ID {} ({})",
            category.category_id, category.name
        );
        Ok(category)
    }
}
