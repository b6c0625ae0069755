//! 商品数据访问（PostgreSQL）

use crate::{
    error::AppError,
    models::{Grocery, GroceryPayload},
    repository::GroceryStore,
};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PgGroceryStore {
    db: PgPool,
}

impl PgGroceryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroceryStore for PgGroceryStore {
    /// 保存新商品
    async fn insert(&self, payload: &GroceryPayload) -> Result<Grocery, AppError> {
        let grocery = sqlx::query_as::<_, Grocery>(
            r#"
            INSERT INTO groceries (name, description, price, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING id, name, description, price, quantity, created_at, updated_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.quantity)
        .fetch_one(&self.db)
        .await?;

        Ok(grocery)
    }

    /// 列出所有商品
    async fn list(&self) -> Result<Vec<Grocery>, AppError> {
        let groceries = sqlx::query_as::<_, Grocery>(
            "SELECT id, name, description, price, quantity, created_at, updated_at \
             FROM groceries ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(groceries)
    }

    /// 根据 ID 查找商品
    async fn find_by_id(&self, id: i64) -> Result<Option<Grocery>, AppError> {
        let grocery = sqlx::query_as::<_, Grocery>(
            "SELECT id, name, description, price, quantity, created_at, updated_at \
             FROM groceries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(grocery)
    }

    /// 更新商品
    async fn update(
        &self,
        id: i64,
        payload: &GroceryPayload,
    ) -> Result<Option<Grocery>, AppError> {
        let grocery = sqlx::query_as::<_, Grocery>(
            r#"
            UPDATE groceries
            SET name = $2, description = $3, price = $4, quantity = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, price, quantity, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.quantity)
        .fetch_optional(&self.db)
        .await?;

        Ok(grocery)
    }

    /// 删除商品
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM groceries WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 设置库存数量（结算扣减库存时使用）
    async fn set_quantity(&self, id: i64, quantity: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE groceries SET quantity = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(quantity)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
