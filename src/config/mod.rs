mod app_config;
mod s3_config;

pub use app_config::{
    AppConfig, CorsConfig, DatabaseConfig, Environment, IdentityConfig, IdentityKey, MediaConfig,
    ServerConfig, WebhookConfig,
};
pub use s3_config::load_s3_client;
