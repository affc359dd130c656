use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::Result,
    models::{AddressListResponse, AddressRequest, AddressResponse, CurrentUser, MessageResponse},
    services::address_service,
    utils::extractors::{JsonBody, parse_id},
};

pub async fn add_address(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<AddressRequest>,
) -> Result<(StatusCode, Json<AddressResponse>)> {
    let address = address_service::add_address(state.store.as_ref(), user.id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddressResponse {
            message: "Address added successfully".to_string(),
            address,
        }),
    ))
}

pub async fn get_addresses(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<AddressListResponse>> {
    let addresses = address_service::list_addresses(state.store.as_ref(), user.id).await?;

    Ok(Json(AddressListResponse { addresses }))
}

pub async fn update_address(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(address_id): Path<String>,
    JsonBody(payload): JsonBody<AddressRequest>,
) -> Result<Json<AddressResponse>> {
    let address = address_service::update_address(
        state.store.as_ref(),
        user.id,
        parse_id(&address_id)?,
        payload,
    )
    .await?;

    Ok(Json(AddressResponse {
        message: "Address updated successfully".to_string(),
        address,
    }))
}

pub async fn delete_address(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(address_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    address_service::delete_address(state.store.as_ref(), user.id, parse_id(&address_id)?).await?;

    Ok(Json(MessageResponse::new("Address deleted successfully")))
}
