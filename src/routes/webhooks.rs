use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, Result},
    models::IdentityEvent,
    services::identity_sync_service,
    utils::signature,
};

pub const SIGNATURE_HEADER: &str = "x-inngest-signature";

pub async fn identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    match &state.webhook_signing_key {
        Some(key) => {
            let header = headers
                .get(SIGNATURE_HEADER)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| AppError::Unauthorized("Missing webhook signature".to_string()))?;
            signature::verify(key, header, &body, chrono::Utc::now().timestamp())?;
        }
        None => tracing::debug!("Webhook signing key not configured, skipping verification"),
    }

    let event: IdentityEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Invalid event payload: {}", e)))?;

    tracing::info!(event = %event.name, "Identity event received");

    let outcome = identity_sync_service::handle_event(state.store.as_ref(), event).await?;

    Ok(Json(json!({ "status": outcome.as_str() })))
}
