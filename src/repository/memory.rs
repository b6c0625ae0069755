//! 内存存储实现
//!
//! 未配置数据库 URL 时的开发/演示模式存储，集成测试也使用它。
//! 进程重启即丢失数据。

use crate::{
    error::AppError,
    models::{CartItem, Grocery, GroceryPayload, User},
    repository::{CartStore, GroceryStore, UserStore},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// 内存用户存储，以用户名为键
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn insert(&self, user: &User) -> Result<(), AppError> {
        self.users.write().await.insert(user.username.clone(), user.clone());
        Ok(())
    }
}

/// 内存商品存储，自增 ID
pub struct MemoryGroceryStore {
    groceries: RwLock<HashMap<i64, Grocery>>,
    next_id: AtomicI64,
}

impl MemoryGroceryStore {
    pub fn new() -> Self {
        Self { groceries: RwLock::new(HashMap::new()), next_id: AtomicI64::new(1) }
    }
}

impl Default for MemoryGroceryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroceryStore for MemoryGroceryStore {
    async fn insert(&self, payload: &GroceryPayload) -> Result<Grocery, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let grocery = Grocery {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            price: payload.price,
            quantity: payload.quantity,
            created_at: now,
            updated_at: now,
        };
        self.groceries.write().await.insert(id, grocery.clone());
        Ok(grocery)
    }

    async fn list(&self) -> Result<Vec<Grocery>, AppError> {
        let mut groceries: Vec<Grocery> = self.groceries.read().await.values().cloned().collect();
        groceries.sort_by_key(|g| g.id);
        Ok(groceries)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Grocery>, AppError> {
        Ok(self.groceries.read().await.get(&id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        payload: &GroceryPayload,
    ) -> Result<Option<Grocery>, AppError> {
        let mut groceries = self.groceries.write().await;
        match groceries.get_mut(&id) {
            Some(grocery) => {
                grocery.name = payload.name.clone();
                grocery.description = payload.description.clone();
                grocery.price = payload.price;
                grocery.quantity = payload.quantity;
                grocery.updated_at = Utc::now();
                Ok(Some(grocery.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.groceries.write().await.remove(&id).is_some())
    }

    async fn set_quantity(&self, id: i64, quantity: i32) -> Result<(), AppError> {
        let mut groceries = self.groceries.write().await;
        if let Some(grocery) = groceries.get_mut(&id) {
            grocery.quantity = quantity;
            grocery.updated_at = Utc::now();
        }
        Ok(())
    }
}

/// 内存购物车存储
pub struct MemoryCartStore {
    items: RwLock<HashMap<i64, CartItem>>,
    next_id: AtomicI64,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self { items: RwLock::new(HashMap::new()), next_id: AtomicI64::new(1) }
    }
}

impl Default for MemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn insert(
        &self,
        user_id: Uuid,
        product_id: i64,
        quantity: i32,
        total_price: f64,
    ) -> Result<CartItem, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let item = CartItem { id, user_id, product_id, quantity, total_price };
        self.items.write().await.insert(id, item.clone());
        Ok(item)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, AppError> {
        let mut items: Vec<CartItem> = self
            .items
            .read()
            .await
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn delete(&self, user_id: Uuid, item_id: i64) -> Result<bool, AppError> {
        let mut items = self.items.write().await;
        match items.get(&item_id) {
            Some(item) if item.user_id == user_id => {
                items.remove(&item_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|_, item| item.user_id != user_id);
        Ok((before - items.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, price: f64, quantity: i32) -> GroceryPayload {
        GroceryPayload { name: name.to_string(), description: None, price, quantity }
    }

    #[tokio::test]
    async fn test_grocery_crud() {
        let store = MemoryGroceryStore::new();

        let apple = store.insert(&payload("apple", 600.0, 50)).await.unwrap();
        let milk = store.insert(&payload("milk", 80.0, 10)).await.unwrap();
        assert_ne!(apple.id, milk.id);

        assert_eq!(store.list().await.unwrap().len(), 2);
        assert_eq!(store.find_by_id(apple.id).await.unwrap().unwrap().name, "apple");

        let updated = store.update(apple.id, &payload("apple", 500.0, 40)).await.unwrap().unwrap();
        assert_eq!(updated.price, 500.0);

        assert!(store.delete(milk.id).await.unwrap());
        assert!(!store.delete(milk.id).await.unwrap());
        assert!(store.find_by_id(milk.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cart_is_scoped_per_user() {
        let store = MemoryCartStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.insert(alice, 1, 2, 1200.0).await.unwrap();
        store.insert(alice, 2, 1, 80.0).await.unwrap();
        let bob_item = store.insert(bob, 1, 1, 600.0).await.unwrap();

        assert_eq!(store.list_by_user(alice).await.unwrap().len(), 2);
        assert_eq!(store.list_by_user(bob).await.unwrap().len(), 1);

        // 他人的条目删不掉
        assert!(!store.delete(alice, bob_item.id).await.unwrap());
        assert!(store.delete(bob, bob_item.id).await.unwrap());

        assert_eq!(store.delete_for_user(alice).await.unwrap(), 2);
        assert!(store.list_by_user(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_store() {
        let store = MemoryUserStore::new();
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: "USER".to_string(),
            created_at: Utc::now(),
        };

        assert!(!store.exists_by_username("alice").await.unwrap());
        store.insert(&user).await.unwrap();
        assert!(store.exists_by_username("alice").await.unwrap());
        assert_eq!(store.find_by_username("alice").await.unwrap().unwrap().id, user.id);
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }
}
