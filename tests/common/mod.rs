#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{Router, body::Bytes};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rust_decimal::Decimal;
use sqlx::types::Json;
use uuid::Uuid;

use oja_back::{
    AppError, AppState, Result, app,
    config::{Environment, IdentityConfig, IdentityKey},
    database::{CartStore, HealthCheck, OrderStore, ProductStore, UserStore},
    models::{
        AddressBook, Cart, ImageFile, NewProduct, NewUser, Order, OrderStatus, Product,
        ProductChanges, ProductForm, ShippingAddress, User,
    },
    services::media_service::MediaHost,
    utils::jwt::{Claims, IdentityVerifier},
};

pub const JWT_SECRET: &str = "test-identity-secret";
pub const ADMIN_EMAIL: &str = "admin@oja.test";
pub const WEBHOOK_KEY: &str = "signkey-test-0123456789abcdef";

#[derive(Default)]
struct MemoryState {
    products: Vec<Product>,
    users: Vec<User>,
    orders: Vec<Order>,
    carts: Vec<Cart>,
}

/// In-memory stand-in for the Postgres store. Records keep insertion order
/// and "newest first" listings are produced by reversing it.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, clerk_id: &str, email: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            clerk_id: clerk_id.to_string(),
            email: email.to_string(),
            name: "Test User".to_string(),
            image_url: String::new(),
            addresses: Json(AddressBook::new()),
            wishlist: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn seed_order(&self, user: &User, total: Decimal, status: OrderStatus) -> Order {
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            user_id: Some(user.id),
            clerk_id: user.clerk_id.clone(),
            order_items: Json(Vec::new()),
            shipping_address: Json(ShippingAddress {
                full_name: "Ada Obi".into(),
                street_address: "1 Marina Rd".into(),
                city: "Lagos".into(),
                state: "Lagos".into(),
                zip_code: "101001".into(),
                country: "NG".into(),
                phone_number: "+2348000000000".into(),
            }),
            payment_result: None,
            total_price: total,
            order_status: status,
            shipped_at: None,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().orders.push(order.clone());
        order
    }

    pub fn product_count(&self) -> usize {
        self.state.lock().unwrap().products.len()
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product> {
        let mut state = self.state.lock().unwrap();
        // Distinct timestamps keep newest-first ordering stable.
        let now = Utc::now() + Duration::microseconds(state.products.len() as i64);
        let product = Product {
            id: Uuid::new_v4(),
            name: product.fields.name,
            description: product.fields.description,
            price: product.fields.price,
            stock: product.fields.stock,
            category: product.fields.category,
            images: product.images,
            average_rating: 0.0,
            total_reviews: 0,
            created_at: now,
            updated_at: now,
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state.products.iter().rev().cloned().collect())
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| wanted.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn update_product(&self, id: Uuid, changes: ProductChanges) -> Result<Option<Product>> {
        let mut state = self.state.lock().unwrap();
        let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.name = changes.fields.name;
        product.description = changes.fields.description;
        product.price = changes.fields.price;
        product.stock = changes.fields.stock;
        product.category = changes.fields.category;
        if let Some(images) = changes.images {
            product.images = images;
        }
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(state.products.len() != before)
    }

    async fn count_products(&self) -> Result<i64> {
        Ok(self.state.lock().unwrap().products.len() as i64)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_user_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.clerk_id == clerk_id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let mut state = self.state.lock().unwrap();
        if state
            .users
            .iter()
            .any(|u| u.clerk_id == user.clerk_id || u.email == user.email)
        {
            return Err(AppError::DuplicateKey("User already exists".to_string()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            clerk_id: user.clerk_id,
            email: user.email,
            name: user.name,
            image_url: user.image_url,
            addresses: Json(AddressBook::new()),
            wishlist: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn delete_user_by_clerk_id(&self, clerk_id: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(user_id) = state
            .users
            .iter()
            .find(|u| u.clerk_id == clerk_id)
            .map(|u| u.id)
        else {
            return Ok(false);
        };
        state.users.retain(|u| u.id != user_id);
        for order in state.orders.iter_mut().filter(|o| o.user_id == Some(user_id)) {
            order.user_id = None;
        }
        state.carts.retain(|c| c.user_id != user_id);
        Ok(true)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().rev().cloned().collect())
    }

    async fn count_users(&self) -> Result<i64> {
        Ok(self.state.lock().unwrap().users.len() as i64)
    }

    async fn save_addresses(&self, user_id: Uuid, addresses: &AddressBook) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.addresses = Json(addresses.clone());
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn save_wishlist(&self, user_id: Uuid, wishlist: &[Uuid]) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.wishlist = wishlist.to_vec();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.iter().rev().cloned().collect())
    }

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn save_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        shipped_at: Option<DateTime<Utc>>,
        delivered_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Order>> {
        let mut state = self.state.lock().unwrap();
        let Some(order) = state.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.order_status = status;
        order.shipped_at = shipped_at;
        order.delivered_at = delivered_at;
        order.updated_at = Utc::now();
        Ok(Some(order.clone()))
    }

    async fn count_orders(&self) -> Result<i64> {
        Ok(self.state.lock().unwrap().orders.len() as i64)
    }

    async fn total_revenue(&self) -> Result<Decimal> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.iter().map(|o| o.total_price).sum())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find_or_create_cart(&self, user_id: Uuid, clerk_id: &str) -> Result<Cart> {
        let mut state = self.state.lock().unwrap();
        if let Some(cart) = state.carts.iter().find(|c| c.user_id == user_id) {
            return Ok(cart.clone());
        }
        let now = Utc::now();
        let cart = Cart {
            id: Uuid::new_v4(),
            user_id,
            clerk_id: clerk_id.to_string(),
            items: Json(Vec::new()),
            created_at: now,
            updated_at: now,
        };
        state.carts.push(cart.clone());
        Ok(cart)
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn check_health(&self) -> Result<()> {
        Ok(())
    }
}

/// Records every call. Uploads of files whose name appears in
/// `failing_uploads`, and deletes of URLs in `failing_deletes`, return an
/// upstream error.
#[derive(Default)]
pub struct FakeMediaHost {
    pub uploaded: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
    pub failing_uploads: Mutex<HashSet<String>>,
    pub failing_deletes: Mutex<HashSet<String>>,
}

impl FakeMediaHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_upload_of(&self, file_name: &str) {
        self.failing_uploads
            .lock()
            .unwrap()
            .insert(file_name.to_string());
    }

    pub fn fail_delete_of(&self, url: &str) {
        self.failing_deletes.lock().unwrap().insert(url.to_string());
    }

    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaHost for FakeMediaHost {
    async fn upload(&self, file: &ImageFile) -> Result<String> {
        if self.failing_uploads.lock().unwrap().contains(&file.file_name) {
            return Err(AppError::UpstreamError(format!(
                "upload of {} rejected",
                file.file_name
            )));
        }
        let url = format!("https://cdn.oja.test/products/{}", file.file_name);
        self.uploaded.lock().unwrap().push(url.clone());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(url.to_string());
        if self.failing_deletes.lock().unwrap().contains(url) {
            return Err(AppError::UpstreamError(format!("delete of {} rejected", url)));
        }
        Ok(())
    }
}

pub fn image(name: &str) -> ImageFile {
    ImageFile {
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
        bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
    }
}

pub fn mug_form() -> ProductForm {
    ProductForm {
        name: Some("Mug".into()),
        price: Some("9.99".into()),
        description: Some("Stoneware mug".into()),
        stock: Some("10".into()),
        category: Some("Kitchen".into()),
    }
}

pub fn token_for(clerk_id: &str) -> String {
    let claims = Claims {
        sub: clerk_id.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        iss: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub media: Arc<FakeMediaHost>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let media = Arc::new(FakeMediaHost::new());

    let identity = IdentityVerifier::from_config(&IdentityConfig {
        key: IdentityKey::Secret(JWT_SECRET.to_string()),
        issuer: None,
    })
    .unwrap();

    let state = AppState {
        store: store.clone(),
        media: media.clone(),
        identity: Arc::new(identity),
        admin_email: ADMIN_EMAIL.to_string(),
        webhook_signing_key: Some(WEBHOOK_KEY.to_string()),
        max_image_size: 1024 * 1024,
        environment: Environment::Production,
    };

    TestApp {
        router: app::with_state(state, 10 * 1024 * 1024),
        store,
        media,
    }
}
