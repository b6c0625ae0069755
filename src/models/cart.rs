//! Cart domain models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line in a user's cart.
/// `total_price` is captured at add time (price * quantity).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartItem {
    pub id: i64,
    pub user_id: Uuid,
    pub product_id: i64,
    pub quantity: i32,
    pub total_price: f64,
}
