use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::{self, AppConfig, CorsConfig, Environment},
    database::{self, Store},
    error::{AppError, Result},
    middleware::expose_error_detail,
    queries::PgStore,
    routes,
    services::media_service::{MediaHost, S3MediaHost},
    utils::jwt::IdentityVerifier,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub media: Arc<dyn MediaHost>,
    pub identity: Arc<IdentityVerifier>,
    pub admin_email: String,
    pub webhook_signing_key: Option<String>,
    pub max_image_size: usize,
    pub environment: Environment,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;
    let s3_client = config::load_s3_client(&config.media).await?;

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        media: Arc::new(S3MediaHost::new(
            s3_client,
            config.media.bucket.clone(),
            config.media.assets_url.clone(),
        )),
        identity: Arc::new(IdentityVerifier::from_config(&config.identity)?),
        admin_email: config.admin_email.clone(),
        webhook_signing_key: config.webhook.signing_key.clone(),
        max_image_size: config.server.max_image_size,
        environment: config.environment,
    };

    let cors = cors_layer(&config.cors)?;

    Ok(with_state(state, config.server.max_body_size).layer(cors))
}

/// Assembles the router around an already constructed state.
pub fn with_state(state: AppState, max_body_size: usize) -> Router {
    let mut app = routes::create_router(state.clone())
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http());

    if state.environment.is_development() {
        app = app.layer(middleware::from_fn(expose_error_detail));
    }

    app.with_state(state)
}

fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_credentials(true)
        .allow_origin(allowed_origins))
}
