//! Grocery (product) domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Grocery catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Grocery {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a grocery
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GroceryPayload {
    #[validate(length(min = 1, message = "Name cannot be blank"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be positive"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Quantity must be non-negative"))]
    pub quantity: i32,
}
