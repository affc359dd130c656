//! Persistence seams. Each aggregate is written as a single record; there
//! are no multi-record transactions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{
        AddressBook, Cart, NewProduct, NewUser, Order, OrderStatus, Product, ProductChanges, User,
    },
};

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: NewProduct) -> Result<Product>;

    /// Newest first.
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>>;

    async fn find_products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>>;

    /// Returns `None` when the product no longer exists.
    async fn update_product(&self, id: Uuid, changes: ProductChanges) -> Result<Option<Product>>;

    /// Returns `true` if a record was removed.
    async fn delete_product(&self, id: Uuid) -> Result<bool>;

    async fn count_products(&self) -> Result<i64>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_user_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>>;

    async fn insert_user(&self, user: NewUser) -> Result<User>;

    async fn delete_user_by_clerk_id(&self, clerk_id: &str) -> Result<bool>;

    /// Newest first.
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn count_users(&self) -> Result<i64>;

    /// Replaces the embedded address list. Returns `false` if the user is gone.
    async fn save_addresses(&self, user_id: Uuid, addresses: &AddressBook) -> Result<bool>;

    /// Replaces the wishlist. Returns `false` if the user is gone.
    async fn save_wishlist(&self, user_id: Uuid, wishlist: &[Uuid]) -> Result<bool>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Newest first.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>>;

    async fn save_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        shipped_at: Option<DateTime<Utc>>,
        delivered_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Order>>;

    async fn count_orders(&self) -> Result<i64>;

    /// Sum of `total_price` over all orders, zero when there are none.
    async fn total_revenue(&self) -> Result<Decimal>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_or_create_cart(&self, user_id: Uuid, clerk_id: &str) -> Result<Cart>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check_health(&self) -> Result<()>;
}

pub trait Store: ProductStore + UserStore + OrderStore + CartStore + HealthCheck {}

impl<T> Store for T where T: ProductStore + UserStore + OrderStore + CartStore + HealthCheck {}
