//! 商品服务
//! 商品目录的增删改查与库存扣减

use crate::{
    error::AppError,
    models::{Grocery, GroceryPayload},
    repository::GroceryStore,
};
use std::sync::Arc;

pub struct GroceryService {
    store: Arc<dyn GroceryStore>,
}

impl GroceryService {
    pub fn new(store: Arc<dyn GroceryStore>) -> Self {
        Self { store }
    }

    /// 新增商品
    pub async fn create(&self, payload: GroceryPayload) -> Result<Grocery, AppError> {
        let grocery = self.store.insert(&payload).await?;
        tracing::info!(id = grocery.id, name = %grocery.name, "Grocery created");
        Ok(grocery)
    }

    /// 列出所有商品
    pub async fn list(&self) -> Result<Vec<Grocery>, AppError> {
        self.store.list().await
    }

    /// 根据 ID 查找商品
    pub async fn get(&self, id: i64) -> Result<Grocery, AppError> {
        self.store.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// 更新商品
    pub async fn update(&self, id: i64, payload: GroceryPayload) -> Result<Grocery, AppError> {
        let grocery = self.store.update(id, &payload).await?.ok_or(AppError::NotFound)?;
        tracing::info!(id = grocery.id, "Grocery updated");
        Ok(grocery)
    }

    /// 删除商品
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(id, "Grocery deleted");
        Ok(())
    }

    /// 购买后扣减库存。库存不足时整体失败，不做部分扣减。
    pub async fn reduce_stock(&self, id: i64, quantity: i32) -> Result<(), AppError> {
        let grocery = self.get(id).await?;
        if grocery.quantity < quantity {
            return Err(AppError::BadRequest(format!(
                "Insufficient stock for product: {}",
                grocery.name
            )));
        }
        self.store.set_quantity(id, grocery.quantity - quantity).await
    }
}
