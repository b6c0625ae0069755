//! 领域模型模块

pub mod auth;
pub mod cart;
pub mod grocery;
pub mod user;

pub use auth::{LoginRequest, RegisterRequest};
pub use cart::CartItem;
pub use grocery::{Grocery, GroceryPayload};
pub use user::{Role, User};
