use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    database::OrderStore,
    error::Result,
    models::{Order, OrderStatus},
    queries::PgStore,
};

#[async_trait]
impl OrderStore for PgStore {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    async fn save_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        shipped_at: Option<DateTime<Utc>>,
        delivered_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders
             SET order_status = $1, shipped_at = $2, delivered_at = $3, updated_at = NOW()
             WHERE id = $4 RETURNING *",
        )
        .bind(status.as_str())
        .bind(shipped_at)
        .bind(delivered_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn count_orders(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn total_revenue(&self) -> Result<Decimal> {
        let total =
            sqlx::query_scalar::<_, Decimal>("SELECT COALESCE(SUM(total_price), 0) FROM orders")
                .fetch_one(&self.pool)
                .await?;

        Ok(total)
    }
}
