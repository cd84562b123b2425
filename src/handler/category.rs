use crate::{
    abstract_trait::DynCategoryService,
    domain::{
        requests::CreateCategoryRequest,
        responses::{ApiResponse, CategoryResponse},
    },
    errors::HttpError,
    middleware::{AuthUser, SimpleValidatedJson, jwt::auth_middleware, require_admin},
    state::AppState,
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Category",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_categories(
    Extension(service): Extension<DynCategoryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Category",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponse>),
        (status = 409, description = "Category already exists"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_category(
    Extension(service): Extension<DynCategoryService>,
    Extension(auth): Extension<AuthUser>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth)?;

    let response = service.create_category(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn category_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/categories", get(get_categories))
        .route("/api/categories", post(create_category))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.category_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
