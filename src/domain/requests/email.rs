use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Uploaded attachment captured from the multipart form. Bytes are held in
/// memory; the request body limit caps how large this can get.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendEmailRequest {
    #[validate(email(message = "Invalid recipient email"))]
    #[schema(example = "customer@example.com")]
    pub to: String,

    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,

    #[serde(skip)]
    #[schema(ignore)]
    pub attachment: Option<EmailAttachment>,
}
