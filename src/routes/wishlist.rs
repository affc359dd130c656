use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{CurrentUser, WishlistIdsResponse, WishlistRequest, WishlistResponse},
    services::wishlist_service,
    utils::extractors::{JsonBody, parse_id},
};

pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<WishlistRequest>,
) -> Result<(StatusCode, Json<WishlistIdsResponse>)> {
    let product_id = payload
        .product_id
        .ok_or_else(|| AppError::Validation("productId is required".to_string()))?;

    let wishlist =
        wishlist_service::add_to_wishlist(state.store.as_ref(), user.id, product_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(WishlistIdsResponse {
            message: "Product added to wishlist".to_string(),
            wishlist,
        }),
    ))
}

pub async fn get_wishlist(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<WishlistResponse>> {
    let wishlist = wishlist_service::get_wishlist(state.store.as_ref(), user.id).await?;

    Ok(Json(WishlistResponse { wishlist }))
}

pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(product_id): Path<String>,
) -> Result<Json<WishlistIdsResponse>> {
    let wishlist = wishlist_service::remove_from_wishlist(
        state.store.as_ref(),
        user.id,
        parse_id(&product_id)?,
    )
    .await?;

    Ok(Json(WishlistIdsResponse {
        message: "Product removed from wishlist".to_string(),
        wishlist,
    }))
}
