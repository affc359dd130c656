use chrono::Utc;
use uuid::Uuid;

use crate::{
    database::OrderStore,
    error::{AppError, Result},
    models::{Order, UpdateOrderStatusRequest},
};

fn order_not_found() -> AppError {
    AppError::NotFound("Order not found".to_string())
}

pub async fn list_orders<S>(store: &S) -> Result<Vec<Order>>
where
    S: OrderStore + ?Sized,
{
    store.list_orders().await
}

pub async fn get_order<S>(store: &S, id: Uuid) -> Result<Order>
where
    S: OrderStore + ?Sized,
{
    store.find_order(id).await?.ok_or_else(order_not_found)
}

/// Validates the requested status, then applies it. Out-of-order transitions
/// are accepted; only the shipped/delivered timestamps are guarded.
pub async fn update_order_status<S>(
    store: &S,
    id: Uuid,
    request: &UpdateOrderStatusRequest,
) -> Result<Order>
where
    S: OrderStore + ?Sized,
{
    let status = request.validate()?;

    let mut order = store.find_order(id).await?.ok_or_else(order_not_found)?;
    let previous = order.order_status;
    order.apply_status(status, Utc::now());

    let order = store
        .save_order_status(id, order.order_status, order.shipped_at, order.delivered_at)
        .await?
        .ok_or_else(order_not_found)?;

    tracing::info!(order_id = %id, from = %previous, to = %status, "Order status updated");

    Ok(order)
}
