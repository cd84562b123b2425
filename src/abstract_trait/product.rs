use crate::{
    domain::{
        requests::{CreateProductRequest, FindAllProducts, NewProduct, UpdateProductRequest},
        responses::{ApiResponse, ApiResponsePagination, ImportReport, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Product as ProductModel, ProductWithCategory},
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::AsyncBufRead;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductWithCategory>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductWithCategory>, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    async fn trash_product(&self, id: i32) -> Result<ProductModel, RepositoryError>;
    /// Writes all rows in one transaction; either every row lands or none do.
    async fn create_products_batch(
        &self,
        products: &[NewProduct],
    ) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn trash_product(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn import_products(
        &self,
        reader: &mut (dyn AsyncBufRead + Send + Unpin),
    ) -> Result<ApiResponse<ImportReport>, ServiceError>;
}
