use async_trait::async_trait;
use uuid::Uuid;

use crate::{database::CartStore, error::Result, models::Cart, queries::PgStore};

#[async_trait]
impl CartStore for PgStore {
    async fn find_or_create_cart(&self, user_id: Uuid, clerk_id: &str) -> Result<Cart> {
        let cart = sqlx::query_as::<_, Cart>(
            "INSERT INTO carts (id, user_id, clerk_id) VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(clerk_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(cart)
    }
}
