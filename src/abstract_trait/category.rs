use crate::{
    domain::{requests::CreateCategoryRequest, responses::{ApiResponse, CategoryResponse}},
    errors::{RepositoryError, ServiceError},
    model::Category as CategoryModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCategoryQueryRepository = Arc<dyn CategoryQueryRepositoryTrait + Send + Sync>;
pub type DynCategoryCommandRepository = Arc<dyn CategoryCommandRepositoryTrait + Send + Sync>;
pub type DynCategoryService = Arc<dyn CategoryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<CategoryModel>, RepositoryError>;
    /// Case-insensitive lookup; the import pipeline re-resolves through this
    /// after losing a create race.
    async fn find_by_name(&self, name: &str) -> Result<Option<CategoryModel>, RepositoryError>;
}

#[async_trait]
pub trait CategoryCommandRepositoryTrait {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError>;
}

#[async_trait]
pub trait CategoryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError>;
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
}
