//! 购物车服务
//! 条目增删、查看与结算

use crate::{
    error::AppError, models::CartItem, repository::CartStore, services::GroceryService,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct CartService {
    carts: Arc<dyn CartStore>,
    groceries: Arc<GroceryService>,
}

impl CartService {
    pub fn new(carts: Arc<dyn CartStore>, groceries: Arc<GroceryService>) -> Self {
        Self { carts, groceries }
    }

    /// 添加商品到购物车，总价在此刻定格（单价 × 数量）
    pub async fn add_item(
        &self,
        user_id: Uuid,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartItem, AppError> {
        if quantity <= 0 {
            return Err(AppError::BadRequest("Quantity must be positive".to_string()));
        }

        let product = self.groceries.get(product_id).await?;

        let total_price = product.price * quantity as f64;
        let item = self.carts.insert(user_id, product_id, quantity, total_price).await?;

        tracing::info!(user_id = %user_id, product_id, quantity, "Item added to cart");
        Ok(item)
    }

    /// 当前用户的购物车条目
    pub async fn items(&self, user_id: Uuid) -> Result<Vec<CartItem>, AppError> {
        self.carts.list_by_user(user_id).await
    }

    /// 移除购物车条目。条目不存在或属于其他用户时返回 404，
    /// 两种情况对外不可区分。
    pub async fn remove_item(&self, user_id: Uuid, item_id: i64) -> Result<(), AppError> {
        if !self.carts.delete(user_id, item_id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// 结算：逐项扣减库存后清空购物车。库存不足时整体失败。
    /// 返回 false 表示购物车为空，结算失败。
    pub async fn checkout(&self, user_id: Uuid) -> Result<bool, AppError> {
        let items = self.items(user_id).await?;
        if items.is_empty() {
            return Ok(false);
        }

        for item in &items {
            self.groceries.reduce_stock(item.product_id, item.quantity).await?;
        }

        let cleared = self.carts.delete_for_user(user_id).await?;
        tracing::info!(user_id = %user_id, cleared, "Checkout completed");
        Ok(true)
    }
}
