use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        CustomerListResponse, DashboardStats, ImageFile, MessageResponse, OrderListResponse,
        OrderResponse, ProductForm, ProductListResponse, ProductResponse,
        UpdateOrderStatusRequest,
    },
    services::{catalog_service, dashboard_service, order_service},
    utils::extractors::{JsonBody, parse_id},
};

//PRODUCT ROUTES
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let (form, files) = read_product_multipart(multipart, state.max_image_size).await?;

    let product =
        catalog_service::create_product(state.store.as_ref(), state.media.as_ref(), &form, &files)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: Some("Product created successfully.".to_string()),
            product,
        }),
    ))
}

pub async fn get_all_products(State(state): State<AppState>) -> Result<Json<ProductListResponse>> {
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

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ProductResponse>> {
    let id = parse_id(&id)?;
    let (form, files) = read_product_multipart(multipart, state.max_image_size).await?;

    let product = catalog_service::update_product(
        state.store.as_ref(),
        state.media.as_ref(),
        id,
        &form,
        &files,
    )
    .await?;

    Ok(Json(ProductResponse {
        message: Some("Product updated successfully.".to_string()),
        product,
    }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    catalog_service::delete_product(state.store.as_ref(), state.media.as_ref(), parse_id(&id)?)
        .await?;

    Ok(Json(MessageResponse::new("Product deleted successfully.")))
}

/// Text fields go into the form, `images` parts become files. Files are
/// checked for type and size here; the count is checked by the service.
async fn read_product_multipart(
    mut multipart: Multipart,
    max_image_size: usize,
) -> Result<(ProductForm, Vec<ImageFile>)> {
    let invalid = |e: axum::extract::multipart::MultipartError| {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    };

    let mut form = ProductForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "images" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(invalid)?;

            let file = ImageFile {
                file_name,
                content_type,
                bytes,
            };

            if !file.is_allowed_image() {
                return Err(AppError::Validation(
                    "Only image files are allowed!".to_string(),
                ));
            }

            if file.bytes.len() > max_image_size {
                return Err(AppError::Validation(format!(
                    "Image {} exceeds the {} byte limit",
                    file.file_name, max_image_size
                )));
            }

            files.push(file);
        } else {
            let value = field.text().await.map_err(invalid)?;
            form.set(&name, value);
        }
    }

    Ok((form, files))
}

//ORDER ROUTES
pub async fn get_all_orders(State(state): State<AppState>) -> Result<Json<OrderListResponse>> {
    let orders = order_service::list_orders(state.store.as_ref()).await?;

    Ok(Json(OrderListResponse { orders }))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>> {
    let order = order_service::get_order(state.store.as_ref(), parse_id(&id)?).await?;

    Ok(Json(OrderResponse {
        message: None,
        order,
    }))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>> {
    let order =
        order_service::update_order_status(state.store.as_ref(), parse_id(&id)?, &payload).await?;

    Ok(Json(OrderResponse {
        message: Some("Order status updated successfully".to_string()),
        order,
    }))
}

//CUSTOMER ROUTES
pub async fn get_all_customers(
    State(state): State<AppState>,
) -> Result<Json<CustomerListResponse>> {
    let customers = state.store.list_users().await?;

    Ok(Json(CustomerListResponse { customers }))
}

pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let stats = dashboard_service::dashboard_stats(state.store.as_ref()).await?;

    Ok(Json(stats))
}
