use crate::{
    abstract_trait::DynJwtService,
    domain::requests::Role,
    errors::{ErrorResponse, HttpError},
};
use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;

/// Authenticated caller, inserted into request extensions after the token
/// checks out.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

pub fn require_admin(auth: &AuthUser) -> Result<(), HttpError> {
    if auth.role != Role::Admin {
        return Err(HttpError::Forbidden(
            "Access denied. Required role: Admin".to_string(),
        ));
    }
    Ok(())
}

pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        });

    let token = match token {
        Some(token) => token,
        None => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    status: "fail".to_string(),
                    message: "You are not logged in, please provide token".to_string(),
                }),
            ));
        }
    };

    let claims = match jwt.verify_token(&token) {
        Ok(claims) => claims,
        Err(_) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    status: "fail".to_string(),
                    message: "Invalid token".to_string(),
                }),
            ));
        }
    };

    let role = match Role::parse(&claims.role) {
        Some(role) => role,
        None => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    status: "fail".to_string(),
                    message: "Unknown role in token".to_string(),
                }),
            ));
        }
    };

    req.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        username: claims.username,
        role,
    });

    Ok(next.run(req).await)
}
