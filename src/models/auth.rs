//! 认证相关的请求 DTO

use serde::Deserialize;
use validator::Validate;

/// 注册请求。role 可省略，默认为非特权角色 USER
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be blank"))]
    pub password: String,
    pub role: Option<String>,
}

/// 登录请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username cannot be blank"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be blank"))]
    pub password: String,
}
