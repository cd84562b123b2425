use crate::errors::ErrorResponse;
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON extractor that runs the body through its `validator` rules before the
/// handler sees it. Rejections use the same `ErrorResponse` envelope as every
/// other error path in the service.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                (
                    rejection.status(),
                    Json(ErrorResponse {
                        status: "fail".to_string(),
                        message: format!("Invalid JSON: {}", rejection.body_text()),
                    }),
                )
            })?;

        body.validate().map_err(|errors| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    status: "fail".to_string(),
                    message: format_validation_errors(&errors),
                }),
            )
        })?;

        Ok(Self(body))
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {field}"));
            messages.push(format!("{field}: {message}"));
        }
    }

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct SignupForm {
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
        password: String,
    }

    #[test]
    fn field_errors_are_joined_with_their_messages() {
        let form = SignupForm {
            email: "not-an-address".to_string(),
            password: "abc".to_string(),
        };

        let message = format_validation_errors(&form.validate().unwrap_err());

        assert!(message.contains("email: Invalid email format"));
        assert!(message.contains("password: Password must be at least 6 characters"));
    }

    #[test]
    fn valid_form_produces_no_errors() {
        let form = SignupForm {
            email: "alice@example.com".to_string(),
            password: "hunter22".to_string(),
        };

        assert!(form.validate().is_ok());
    }
}
