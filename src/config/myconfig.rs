use crate::importer::InvalidNumericPolicy;
use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from_email: String,
}

impl EmailConfig {
    pub fn init() -> Result<Self> {
        let smtp_username =
            std::env::var("SMTP_USERNAME").context("Missing environment variable: SMTP_USERNAME")?;
        let smtp_password =
            std::env::var("SMTP_PASSWORD").context("Missing environment variable: SMTP_PASSWORD")?;
        let smtp_host =
            std::env::var("SMTP_HOST").context("Missing environment variable: SMTP_HOST")?;
        let smtp_port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .context("SMTP_PORT must be a valid u16 integer")?;
        let from_email = std::env::var("SMTP_FROM")
            .unwrap_or_else(|_| "no-reply@inventory.local".to_string());

        Ok(Self {
            smtp_server: smtp_host,
            smtp_port,
            smtp_user: smtp_username,
            smtp_pass: smtp_password,
            from_email,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub on_invalid_numeric: InvalidNumericPolicy,
}

impl ImportConfig {
    pub fn init() -> Result<Self> {
        let on_invalid_numeric = match std::env::var("IMPORT_ON_INVALID_NUMERIC")
            .unwrap_or_else(|_| "reject".to_string())
            .as_str()
        {
            "reject" => InvalidNumericPolicy::RejectRow,
            "zero" => InvalidNumericPolicy::DefaultZero,
            other => {
                return Err(anyhow!(
                    "IMPORT_ON_INVALID_NUMERIC must be 'reject' or 'zero', got '{}'",
                    other
                ));
            }
        };

        Ok(Self { on_invalid_numeric })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub email_config: EmailConfig,
    pub import_config: ImportConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;
        let run_migrations_str =
            std::env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "false".to_string());
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let email_config = EmailConfig::init().context("failed email config")?;
        let import_config = ImportConfig::init().context("failed import config")?;

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            email_config,
            import_config,
        })
    }
}
