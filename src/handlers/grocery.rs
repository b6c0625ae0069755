//! 商品目录的 HTTP 处理器
//!
//! 读操作公开；写操作由访问策略限定为 ADMIN，处理器本身不做角色判断。

use crate::{error::AppError, middleware::AppState, models::GroceryPayload};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// 新增商品 → 201
pub async fn create_grocery(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GroceryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;

    let grocery = state.grocery_service.create(payload).await?;

    Ok((StatusCode::CREATED, Json(grocery)))
}

/// 商品列表
pub async fn list_groceries(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let groceries = state.grocery_service.list().await?;
    Ok(Json(groceries))
}

/// 商品详情 → 200 | 404
pub async fn get_grocery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let grocery = state.grocery_service.get(id).await?;
    Ok(Json(grocery))
}

/// 更新商品 → 200 | 404
pub async fn update_grocery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<GroceryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;

    let grocery = state.grocery_service.update(id, payload).await?;

    Ok(Json(grocery))
}

/// 删除商品 → 204 | 404
pub async fn delete_grocery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.grocery_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
