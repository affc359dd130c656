mod cart_queries;
mod order_queries;
mod product_queries;
mod user_queries;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    database::{self, HealthCheck},
    error::Result,
};

/// PostgreSQL-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn check_health(&self) -> Result<()> {
        database::check_health(&self.pool).await
    }
}
