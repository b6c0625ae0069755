//! 测试公共模块
//! 基于内存存储构建测试应用，无需外部数据库

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use grocery_system::{
    auth::{JwtService, PasswordHasher},
    config::{AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig},
    middleware::AppState,
    models::{GroceryPayload, RegisterRequest},
    repository::{MemoryCartStore, MemoryGroceryStore, MemoryUserStore},
    routes,
    services::{AuthService, CartService, GroceryService},
};
use http_body_util::BodyExt;
use secrecy::Secret;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

/// 创建测试配置
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(), // 使用随机端口
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: None, // 内存存储
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig { level: "debug".to_string(), format: "pretty".to_string() },
        security: SecurityConfig {
            jwt_secret: Secret::new(TEST_JWT_SECRET.to_string()),
            token_ttl_ms: 300_000, // 5分钟用于测试
        },
    }
}

/// 创建测试应用状态（内存存储）
pub fn create_test_app_state() -> Arc<AppState> {
    let config = create_test_config();
    let jwt_service = Arc::new(JwtService::from_config(&config).expect("JWT service"));
    let users = Arc::new(MemoryUserStore::new());
    let hasher = Arc::new(PasswordHasher::new());
    let auth_service =
        Arc::new(AuthService::new(users.clone(), hasher, jwt_service.clone()));
    let grocery_service = Arc::new(GroceryService::new(Arc::new(MemoryGroceryStore::new())));
    let cart_service =
        Arc::new(CartService::new(Arc::new(MemoryCartStore::new()), grocery_service.clone()));

    Arc::new(AppState {
        config,
        jwt_service,
        auth_service,
        grocery_service,
        cart_service,
        users,
    })
}

/// 创建测试应用（状态 + 路由）
pub fn create_test_app() -> (Arc<AppState>, Router) {
    let state = create_test_app_state();
    let app = routes::create_router(state.clone());
    (state, app)
}

/// 创建测试用户并返回其登录令牌
pub async fn register_and_login(
    state: &Arc<AppState>,
    username: &str,
    password: &str,
    role: Option<&str>,
) -> String {
    state
        .auth_service
        .register(RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: role.map(|r| r.to_string()),
        })
        .await
        .expect("Failed to register test user");

    state
        .auth_service
        .login(grocery_system::models::LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
        .expect("Failed to login test user")
}

/// 预置商品，返回商品 ID
pub async fn seed_grocery(
    state: &Arc<AppState>,
    name: &str,
    price: f64,
    quantity: i32,
) -> i64 {
    state
        .grocery_service
        .create(GroceryPayload { name: name.to_string(), description: None, price, quantity })
        .await
        .expect("Failed to seed grocery")
        .id
}

/// 发送 JSON 请求，可选携带 Bearer 令牌
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}
