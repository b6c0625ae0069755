//! 认证相关的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::{LoginRequest, RegisterRequest},
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 注册
///
/// 公开端点。用户名已存在时返回 400 "User already exists"。
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;

    state.auth_service.register(req).await?;

    Ok(Json(json!({"message": "User registered successfully"})))
}

/// 登录
///
/// 公开端点。成功时响应体是裸 JSON 字符串形式的令牌；
/// 失败统一返回 401 "Invalid username or password"。
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(|_| AppError::InvalidCredentials)?;

    let token = state.auth_service.login(req).await?;

    Ok(Json(token))
}
