//! 数据访问层
//!
//! 存储以 trait 作为接缝：生产模式用 PostgreSQL 实现，开发/测试
//! 模式用内存实现。认证核心只依赖 trait。

pub mod cart_repo;
pub mod grocery_repo;
pub mod memory;
pub mod user_repo;

use crate::{
    error::AppError,
    models::{CartItem, Grocery, GroceryPayload, User},
};
use async_trait::async_trait;
use uuid::Uuid;

pub use cart_repo::PgCartStore;
pub use grocery_repo::PgGroceryStore;
pub use memory::{MemoryCartStore, MemoryGroceryStore, MemoryUserStore};
pub use user_repo::PgUserStore;

/// 用户存储
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError>;

    async fn insert(&self, user: &User) -> Result<(), AppError>;
}

/// 商品存储
#[async_trait]
pub trait GroceryStore: Send + Sync {
    async fn insert(&self, payload: &GroceryPayload) -> Result<Grocery, AppError>;

    async fn list(&self) -> Result<Vec<Grocery>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Grocery>, AppError>;

    /// 返回 None 表示记录不存在
    async fn update(&self, id: i64, payload: &GroceryPayload)
        -> Result<Option<Grocery>, AppError>;

    /// 返回 false 表示记录不存在
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn set_quantity(&self, id: i64, quantity: i32) -> Result<(), AppError>;
}

/// 购物车存储
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn insert(
        &self,
        user_id: Uuid,
        product_id: i64,
        quantity: i32,
        total_price: f64,
    ) -> Result<CartItem, AppError>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, AppError>;

    /// 只删除属于该用户的条目。返回 false 表示记录不存在或不属于该用户
    async fn delete(&self, user_id: Uuid, item_id: i64) -> Result<bool, AppError>;

    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, AppError>;
}
