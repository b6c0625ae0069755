//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, middleware::AppState};

/// 创建应用路由
///
/// 中间件自外向内依次为：请求追踪 → 认证上下文 → 访问策略。
/// 策略层包住包括 404 兜底在内的所有路由，每个请求都过一遍规则表。
pub fn create_router(state: Arc<AppState>) -> Router {
    // 认证端点（公开）
    let auth_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    // 商品目录（读公开，写由策略限定为 ADMIN）
    let grocery_routes = Router::new()
        .route(
            "/api/groceries",
            get(handlers::grocery::list_groceries).post(handlers::grocery::create_grocery),
        )
        .route(
            "/api/groceries/{id}",
            get(handlers::grocery::get_grocery)
                .put(handlers::grocery::update_grocery)
                .delete(handlers::grocery::delete_grocery),
        );

    // 购物车（策略兜底规则：任意已认证用户）
    let cart_routes = Router::new()
        .route("/api/cart/add", post(handlers::cart::add_to_cart))
        .route("/api/cart", get(handlers::cart::view_cart))
        .route("/api/cart/remove/{item_id}", delete(handlers::cart::remove_item))
        .route("/api/cart/checkout", post(handlers::cart::checkout));

    // 公开端点（健康检查、API 文档）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api-docs", get(handlers::docs::api_docs));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(grocery_routes)
        .merge(cart_routes)
        .layer(axum::middleware::from_fn(crate::auth::access_policy_middleware))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::auth_context_middleware,
        ))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
