use crate::{
    abstract_trait::EmailServiceTrait,
    config::EmailConfig,
    domain::{requests::SendEmailRequest, responses::ApiResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Attachment, Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{error, info};

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl EmailService {
    pub fn new(config: &EmailConfig) -> Result<Self, ServiceError> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let mailer = SmtpTransport::starttls_relay(&config.smtp_server)
            .map_err(|e| ServiceError::Custom(format!("Failed to create SMTP relay: {e}")))?
            .credentials(creds)
            .port(config.smtp_port)
            .build();

        let from: Mailbox = config
            .from_email
            .parse()
            .map_err(|e| ServiceError::Custom(format!("Invalid sender email format: {e}")))?;

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl EmailServiceTrait for EmailService {
    async fn send(&self, req: &SendEmailRequest) -> Result<ApiResponse<()>, ServiceError> {
        let to: Mailbox = req.to.parse().map_err(|e| {
            error!("❌ Invalid recipient email: {}", e);
            ServiceError::Custom(format!("Invalid recipient email: {e}"))
        })?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&req.subject);

        let html_part = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(req.message.clone());

        let email = match &req.attachment {
            Some(attachment) => {
                let content_type =
                    ContentType::parse(&attachment.content_type).unwrap_or(ContentType::TEXT_PLAIN);

                let attachment_part = Attachment::new(attachment.filename.clone())
                    .body(attachment.data.clone(), content_type);

                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(html_part)
                        .singlepart(attachment_part),
                )
            }
            None => builder.multipart(MultiPart::mixed().singlepart(html_part)),
        }
        .map_err(|e| {
            error!("❌ Failed to build email: {}", e);
            ServiceError::Custom(format!("Failed to build email: {e}"))
        })?;

        match self.mailer.send(email).await {
            Ok(_) => {
                info!("✅ Email sent to {}", req.to);
                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Email sent successfully".to_string(),
                    data: (),
                })
            }
            Err(e) => {
                error!("❌ Failed to send email to {}: {}", req.to, e);
                Err(ServiceError::Custom(format!("Failed to send email: {e}")))
            }
        }
    }
}
