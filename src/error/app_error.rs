use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    DatabaseError(sqlx::Error),
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("internal error: {0}")]
    InternalError(String),
    #[error("upstream error: {0}")]
    UpstreamError(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    DuplicateKey(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Attached to 500-class responses so a development-only layer can expose the
/// suppressed detail.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub ErrorBody);

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) | AppError::ConfigError(_) | AppError::InternalError(_) => {
                "internal_error"
            }
            AppError::UpstreamError(_) => "upstream_error",
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::DuplicateKey(_) => "duplicate_key",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_)
            | AppError::ConfigError(_)
            | AppError::InternalError(_)
            | AppError::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique key");
                return AppError::DuplicateKey(format!("Duplicate entry for {}", constraint));
            }
        }
        AppError::DatabaseError(err)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::ConfigError(format!("Failed to run migrations: {}", err))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let (message, detail) = match self {
            AppError::DatabaseError(ref e) => {
                tracing::error!("Database error: {:?}", e);
                ("Internal server error".to_string(), Some(e.to_string()))
            }
            AppError::ConfigError(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                ("Internal server error".to_string(), Some(msg.clone()))
            }
            AppError::InternalError(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), Some(msg.clone()))
            }
            AppError::UpstreamError(ref msg) => {
                tracing::error!("Upstream error: {}", msg);
                ("Upstream service failed".to_string(), Some(msg.clone()))
            }
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::DuplicateKey(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg) => (msg, None),
        };

        let body = ErrorBody {
            kind,
            message,
            detail: None,
        };

        let mut response = (status, Json(body.clone())).into_response();

        if let Some(detail) = detail {
            response.extensions_mut().insert(ErrorDetail(ErrorBody {
                detail: Some(detail),
                ..body
            }));
        }

        response
    }
}
