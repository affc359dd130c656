use crate::error::{AppError, Result};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(AppError::ConfigError(format!(
                "Invalid APP_ENV value: {}",
                other
            ))),
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub media: MediaConfig,
    pub identity: IdentityConfig,
    pub webhook: WebhookConfig,
    pub admin_email: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
    pub max_image_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub bucket: String,
    pub assets_url: String,
    pub region: String,
}

#[derive(Debug, Clone)]
pub enum IdentityKey {
    /// RS256 public key in PEM form.
    PublicKeyPem(String),
    /// HS256 shared secret.
    Secret(String),
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub key: IdentityKey,
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WebhookConfig {
    pub signing_key: Option<String>,
}

impl WebhookConfig {
    /// Unsigned webhooks are only accepted outside production.
    pub fn for_environment(environment: Environment, signing_key: Option<String>) -> Result<Self> {
        let signing_key = signing_key.filter(|s| !s.trim().is_empty());

        if signing_key.is_none() && !environment.is_development() {
            return Err(AppError::ConfigError(
                "INNGEST_SIGNING_KEY must be set in production".to_string(),
            ));
        }

        Ok(Self { signing_key })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let environment =
            Environment::parse(&env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))?;

        Ok(Self {
            environment,
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", "5005")?,
                max_body_size: parse_var("MAX_BODY_SIZE", "20971520")?,
                max_image_size: parse_var("MAX_IMAGE_SIZE", "5242880")?,
            },
            database: DatabaseConfig {
                url: env::var("DB_URL")
                    .map_err(|_| AppError::ConfigError("DB_URL not set".to_string()))?,
                max_connections: parse_var("DB_MAX_CONNECTIONS", "20")?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("FRONTEND_URL")
                    .unwrap_or_else(|_| "http://localhost:5173".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            media: MediaConfig {
                bucket: env::var("S3_BUCKET")
                    .map_err(|_| AppError::ConfigError("S3_BUCKET not set".to_string()))?,
                assets_url: env::var("ASSETS_URL")
                    .map_err(|_| AppError::ConfigError("ASSETS_URL not set".to_string()))?
                    .trim_end_matches('/')
                    .to_string(),
                region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            },
            identity: IdentityConfig {
                key: identity_key_from_env()?,
                issuer: env::var("IDENTITY_ISSUER").ok().filter(|s| !s.is_empty()),
            },
            webhook: WebhookConfig::for_environment(
                environment,
                env::var("INNGEST_SIGNING_KEY").ok(),
            )?,
            admin_email: env::var("ADMIN_EMAIL")
                .map_err(|_| AppError::ConfigError("ADMIN_EMAIL not set".to_string()))?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn identity_key_from_env() -> Result<IdentityKey> {
    if let Ok(pem) = env::var("IDENTITY_JWT_PUBLIC_KEY") {
        // Allow single-line values with escaped newlines.
        return Ok(IdentityKey::PublicKeyPem(pem.replace("\\n", "\n")));
    }

    env::var("IDENTITY_JWT_SECRET")
        .map(IdentityKey::Secret)
        .map_err(|_| {
            AppError::ConfigError(
                "IDENTITY_JWT_PUBLIC_KEY or IDENTITY_JWT_SECRET must be set".to_string(),
            )
        })
}

fn parse_var<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::ConfigError(format!("Invalid {} value", name)))
}
