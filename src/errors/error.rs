use serde::Serialize;
use utoipa::ToSchema;

/// Envelope for every non-2xx body the service returns, shared by the error
/// types and the validating JSON extractor.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}
