use crate::{
    domain::{requests::SendEmailRequest, responses::ApiResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynEmailService = Arc<dyn EmailServiceTrait + Send + Sync>;

#[async_trait]
pub trait EmailServiceTrait {
    async fn send(&self, req: &SendEmailRequest) -> Result<ApiResponse<()>, ServiceError>;
}
