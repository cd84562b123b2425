use crate::{
    abstract_trait::{
        CategoryServiceTrait, DynCategoryCommandRepository, DynCategoryQueryRepository,
    },
    domain::{
        requests::CreateCategoryRequest,
        responses::{ApiResponse, CategoryResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use tracing::info;

pub struct CategoryService {
    query: DynCategoryQueryRepository,
    command: DynCategoryCommandRepository,
}

impl CategoryService {
    pub fn new(query: DynCategoryQueryRepository, command: DynCategoryCommandRepository) -> Self {
        Self { query, command }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        let categories = self.query.find_all().await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Categories fetched".to_string(),
            data: categories.into_iter().map(CategoryResponse::from).collect(),
        })
    }

    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("📁 Creating category: {}", req.name);

        let category = self.command.create_category(req).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Category created".to_string(),
            data: CategoryResponse::from(category),
        })
    }
}
