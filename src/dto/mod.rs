pub mod cart;
pub mod dashboard;
pub mod items;
pub mod products;
pub mod store;
pub mod validation;
