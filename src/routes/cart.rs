use axum::{Extension, Json, extract::State};

use crate::{
    AppState,
    error::Result,
    models::{CartResponse, CurrentUser},
};

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<CartResponse>> {
    let cart = state
        .store
        .find_or_create_cart(user.id, &user.clerk_id)
        .await?;

    Ok(Json(CartResponse { cart }))
}
