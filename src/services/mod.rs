pub mod cart_service;
pub mod dashboard_service;
pub mod item_service;
pub mod product_service;
pub mod record_service;
pub mod store_service;
pub mod user_service;
