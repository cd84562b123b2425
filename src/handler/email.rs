use crate::{
    abstract_trait::DynEmailService,
    domain::requests::{EmailAttachment, SendEmailRequest},
    errors::HttpError,
    middleware::{AuthUser, jwt::auth_middleware, require_admin},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::Multipart,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/email/send",
    tag = "Email",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Email sent"),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "SMTP failure")
    )
)]
pub async fn send_email_handler(
    Extension(service): Extension<DynEmailService>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    require_admin(&auth)?;

    let mut to = String::new();
    let mut subject = String::new();
    let mut message = String::new();
    let mut attachment = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        match field.name() {
            Some("to") => {
                to = field
                    .text()
                    .await
                    .map_err(|e| HttpError::BadRequest(format!("Invalid 'to' field: {e}")))?;
            }
            Some("subject") => {
                subject = field
                    .text()
                    .await
                    .map_err(|e| HttpError::BadRequest(format!("Invalid 'subject' field: {e}")))?;
            }
            Some("message") => {
                message = field
                    .text()
                    .await
                    .map_err(|e| HttpError::BadRequest(format!("Invalid 'message' field: {e}")))?;
            }
            Some("attachment") => {
                let filename = field
                    .file_name()
                    .unwrap_or("attachment.bin")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    HttpError::BadRequest(format!("Failed to read attachment: {e}"))
                })?;

                // Empty file inputs in browser forms arrive as zero-length
                // parts; treat those as "no attachment".
                if !data.is_empty() {
                    attachment = Some(EmailAttachment {
                        filename,
                        content_type,
                        data: data.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let request = SendEmailRequest {
        to,
        subject,
        message,
        attachment,
    };

    request
        .validate()
        .map_err(|e| HttpError::BadRequest(format!("Validation failed: {e}")))?;

    let response = service.send(&request).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn email_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/email/send", post(send_email_handler))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.email_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
