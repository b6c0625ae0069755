//! 购物车数据访问（PostgreSQL）

use crate::{error::AppError, models::CartItem, repository::CartStore};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgCartStore {
    db: PgPool,
}

impl PgCartStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    /// 添加购物车条目
    async fn insert(
        &self,
        user_id: Uuid,
        product_id: i64,
        quantity: i32,
        total_price: f64,
    ) -> Result<CartItem, AppError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity, total_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, product_id, quantity, total_price
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(total_price)
        .fetch_one(&self.db)
        .await?;

        Ok(item)
    }

    /// 列出用户的购物车条目
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, AppError> {
        let items = sqlx::query_as::<_, CartItem>(
            "SELECT id, user_id, product_id, quantity, total_price \
             FROM cart_items WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// 删除购物车条目（仅限条目属主）
    async fn delete(&self, user_id: Uuid, item_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 清空用户购物车（结算后）
    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
