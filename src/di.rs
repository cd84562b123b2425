use crate::{
    abstract_trait::{
        DynAuthService, DynCategoryService, DynEmailService, DynHashing, DynJwtService,
        DynProductCommandService, DynProductQueryService,
    },
    config::{ConnectionPool, EmailConfig, ImportConfig},
    repository::{CategoryRepository, ProductRepository, UserRepository},
    service::{
        AuthService, CategoryService, EmailService, ProductCommandService, ProductQueryService,
    },
};
use anyhow::{Context, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub product_query_service: DynProductQueryService,
    pub product_command_service: DynProductCommandService,
    pub category_service: DynCategoryService,
    pub email_service: DynEmailService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .field("product_query_service", &"DynProductQueryService")
            .field("product_command_service", &"DynProductCommandService")
            .field("category_service", &"DynCategoryService")
            .field("email_service", &"DynEmailService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(
        pool: ConnectionPool,
        hashing: DynHashing,
        jwt: DynJwtService,
        email_config: &EmailConfig,
        import_config: &ImportConfig,
    ) -> Result<Self> {
        let user_repository = UserRepository::new(pool.clone());
        let category_repository = CategoryRepository::new(pool.clone());
        let product_repository = ProductRepository::new(pool.clone());

        let auth_service = Arc::new(AuthService::new(
            user_repository.query.clone(),
            user_repository.command.clone(),
            hashing,
            jwt,
        )) as DynAuthService;

        let product_query_service = Arc::new(ProductQueryService::new(
            product_repository.query.clone(),
        )) as DynProductQueryService;

        let product_command_service = Arc::new(ProductCommandService::new(
            product_repository.command.clone(),
            category_repository.query.clone(),
            category_repository.command.clone(),
            import_config.on_invalid_numeric,
        )) as DynProductCommandService;

        let category_service = Arc::new(CategoryService::new(
            category_repository.query.clone(),
            category_repository.command.clone(),
        )) as DynCategoryService;

        let email_service = Arc::new(
            EmailService::new(email_config).context("Failed to initialize SMTP email service")?,
        ) as DynEmailService;

        Ok(Self {
            auth_service,
            product_query_service,
            product_command_service,
            category_service,
            email_service,
        })
    }
}
