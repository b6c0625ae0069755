//! 业务服务模块

pub mod auth_service;
pub mod cart_service;
pub mod grocery_service;

pub use auth_service::AuthService;
pub use cart_service::CartService;
pub use grocery_service::GroceryService;
