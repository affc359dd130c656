mod admin;
mod cart;
mod health;
mod products;
mod user_addresses;
mod webhooks;
mod wishlist;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};

use crate::{
    AppState,
    middleware::{admin_only, protect_route},
};

pub use webhooks::SIGNATURE_HEADER;

pub fn create_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route(
            "/products",
            get(admin::get_all_products).post(admin::create_product),
        )
        .route(
            "/products/{id}",
            get(admin::get_product)
                .put(admin::update_product)
                .delete(admin::delete_product),
        )
        .route("/orders", get(admin::get_all_orders))
        .route("/orders/{id}", get(admin::get_order))
        .route("/orders/{id}/status", patch(admin::update_order_status))
        .route("/customers", get(admin::get_all_customers))
        .route("/stats", get(admin::get_dashboard_stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_only))
        .route_layer(middleware::from_fn_with_state(state.clone(), protect_route));

    let users = Router::new()
        .route(
            "/addresses",
            get(user_addresses::get_addresses).post(user_addresses::add_address),
        )
        .route(
            "/addresses/{address_id}",
            put(user_addresses::update_address).delete(user_addresses::delete_address),
        )
        .route(
            "/wishlist",
            get(wishlist::get_wishlist).post(wishlist::add_to_wishlist),
        )
        .route(
            "/wishlist/{product_id}",
            delete(wishlist::remove_from_wishlist),
        )
        .route("/cart", get(cart::get_cart))
        .route_layer(middleware::from_fn_with_state(state, protect_route));

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::readiness_check))
        .route("/api/products", get(products::get_products))
        .route("/api/products/{id}", get(products::get_product))
        .route("/api/webhooks/identity", post(webhooks::identity_webhook))
        .nest("/api/admin", admin)
        .nest("/api/users", users)
}
