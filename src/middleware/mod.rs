use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::{AppError, ErrorDetail},
    models::CurrentUser,
    utils::extractors::extract_bearer_token,
};

/// Resolves the bearer token to a local user and stores it as `CurrentUser`.
pub async fn protect_route(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = extract_bearer_token(req.headers())?;
        state.identity.verify(token)?
    };

    let user = state
        .store
        .find_user_by_clerk_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized - user not found".to_string()))?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Must run after `protect_route`.
pub async fn admin_only(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let CurrentUser(user) = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| AppError::Unauthorized("Unauthorized - user not found".to_string()))?;

    if !user.email.eq_ignore_ascii_case(&state.admin_email) {
        return Err(AppError::Forbidden(
            "Forbidden - admin access only".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

/// Development only: puts the suppressed detail of 500-class errors back
/// into the response body.
pub async fn expose_error_detail(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    match response.extensions().get::<ErrorDetail>().cloned() {
        Some(ErrorDetail(body)) => (response.status(), Json(body)).into_response(),
        None => response,
    }
}
