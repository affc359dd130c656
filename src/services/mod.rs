pub mod address_service;
pub mod catalog_service;
pub mod dashboard_service;
pub mod identity_sync_service;
pub mod media_service;
pub mod order_service;
pub mod wishlist_service;
