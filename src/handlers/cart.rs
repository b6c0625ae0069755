//! 购物车的 HTTP 处理器
//!
//! 所有端点要求已认证（由访问策略兜底规则保证），
//! 用户身份取自认证上下文而非请求参数。

use crate::{auth::AuthContext, error::AppError, middleware::AppState};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// 加购参数（查询字符串）
#[derive(Debug, Deserialize)]
pub struct AddToCartParams {
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub quantity: i32,
}

/// 添加商品到购物车
pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Query(params): Query<AddToCartParams>,
) -> Result<impl IntoResponse, AppError> {
    state
        .cart_service
        .add_item(auth_context.user_id, params.product_id, params.quantity)
        .await?;

    Ok(Json(json!({"message": "Item added to cart successfully"})))
}

/// 查看当前用户的购物车
pub async fn view_cart(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let items = state.cart_service.items(auth_context.user_id).await?;
    Ok(Json(items))
}

/// 移除购物车条目（仅限条目属主）
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(item_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.cart_service.remove_item(auth_context.user_id, item_id).await?;
    Ok(Json(json!({"message": "Item removed from cart"})))
}

/// 结算
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let success = state.cart_service.checkout(auth_context.user_id).await?;

    if !success {
        return Err(AppError::BadRequest("Checkout failed".to_string()));
    }

    Ok(Json(json!({"message": "Order placed successfully"})))
}
