use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::AddressBook;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub clerk_id: String,
    pub email: String,
    pub name: String,
    pub image_url: String,
    pub addresses: Json<AddressBook>,
    pub wishlist: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub clerk_id: String,
    pub email: String,
    pub name: String,
    pub image_url: String,
}

/// The authenticated user, inserted into request extensions by `protect_route`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRequest {
    pub product_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct WishlistIdsResponse {
    pub message: String,
    pub wishlist: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub wishlist: Vec<crate::models::Product>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
