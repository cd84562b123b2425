use crate::{
    abstract_trait::{
        DynCategoryCommandRepository, DynCategoryQueryRepository, DynProductCommandRepository,
        DynProductQueryRepository, ProductCommandServiceTrait, ProductQueryServiceTrait,
    },
    domain::{
        requests::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        responses::{ApiResponse, ApiResponsePagination, ImportReport, Pagination, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    importer::{ImportPipeline, InvalidNumericPolicy},
};
use async_trait::async_trait;
use tokio::io::AsyncBufRead;
use tracing::info;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let (products, total_items) = self.query.find_all(req).await?;

        let page_size = req.page_size.max(1);
        let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as i32;

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Products fetched".to_string(),
            data: products.into_iter().map(ProductResponse::from).collect(),
            pagination: Pagination {
                page: req.page,
                page_size,
                total_items,
                total_pages,
            },
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self
            .query
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product fetched".to_string(),
            data: ProductResponse::from(product),
        })
    }
}

pub struct ProductCommandService {
    command: DynProductCommandRepository,
    category_query: DynCategoryQueryRepository,
    category_command: DynCategoryCommandRepository,
    import_policy: InvalidNumericPolicy,
}

impl ProductCommandService {
    pub fn new(
        command: DynProductCommandRepository,
        category_query: DynCategoryQueryRepository,
        category_command: DynCategoryCommandRepository,
        import_policy: InvalidNumericPolicy,
    ) -> Self {
        Self {
            command,
            category_query,
            category_command,
            import_policy,
        }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.command.create_product(req).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product created".to_string(),
            data: ProductResponse::from(product),
        })
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.command.update_product(req).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product updated".to_string(),
            data: ProductResponse::from(product),
        })
    }

    async fn trash_product(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let product = self.command.trash_product(id).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product deleted".to_string(),
            data: ProductResponse::from(product),
        })
    }

    async fn import_products(
        &self,
        reader: &mut (dyn AsyncBufRead + Send + Unpin),
    ) -> Result<ApiResponse<ImportReport>, ServiceError> {
        info!("📦 Starting bulk product import");

        // Directory state is per-run; build a fresh pipeline each call.
        let pipeline = ImportPipeline::new(
            self.category_query.clone(),
            self.category_command.clone(),
            self.command.clone(),
            self.import_policy,
        );

        let report = pipeline.import(reader).await?;

        Ok(ApiResponse {
            status: "success".to_string(),
            message: format!("Successfully imported {} products", report.imported),
            data: report,
        })
    }
}
