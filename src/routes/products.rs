use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::Result,
    models::{ProductListResponse, ProductResponse},
    services::catalog_service,
    utils::extractors::parse_id,
};

pub async fn get_products(State(state): State<AppState>) -> Result<Json<ProductListResponse>> {
    let products = catalog_service::list_products(state.store.as_ref()).await?;

    Ok(Json(ProductListResponse { products }))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let product = catalog_service::get_product(state.store.as_ref(), parse_id(&id)?).await?;

    Ok(Json(ProductResponse {
        message: None,
        product,
    }))
}
