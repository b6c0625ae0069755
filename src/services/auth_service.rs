//! 认证服务
//! 注册（哈希入库）与登录（凭证校验 + 令牌签发）

use crate::{
    auth::{JwtService, PasswordHasher},
    error::AppError,
    models::{LoginRequest, RegisterRequest, Role, User},
    repository::UserStore,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self { users, hasher, jwt_service }
    }

    /// 注册新用户
    ///
    /// 密码哈希后入库，明文从不落盘。省略 role 时默认为 USER。
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        // 用户名重复直接拒绝。注册接口不构成对已有账号口令的枚举预言机，
        // 这里的明确提示是可接受的。
        if self.users.exists_by_username(&req.username).await? {
            return Err(AppError::BadRequest("User already exists".to_string()));
        }

        let role = match &req.role {
            Some(tag) => Role::parse(tag)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", tag)))?,
            None => Role::User,
        };

        let user = User {
            id: Uuid::new_v4(),
            username: req.username,
            password_hash: self.hasher.hash(&req.password)?,
            role: role.as_str().to_string(),
            created_at: Utc::now(),
        };

        self.users.insert(&user).await?;

        tracing::info!(username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    /// 校验登录凭证并签发令牌
    ///
    /// 用户不存在与密码错误返回同一个 `InvalidCredentials`，
    /// 对外不可区分。
    pub async fn login(&self, req: LoginRequest) -> Result<String, AppError> {
        let user = match self.users.find_by_username(&req.username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(username = %req.username, "Login failed: no such user");
                return Err(AppError::InvalidCredentials);
            }
        };

        if let Err(e) = self.hasher.verify(&req.password, &user.password_hash) {
            tracing::warn!(username = %req.username, "Login failed: bad credentials");
            return Err(e);
        }

        let token = self.jwt_service.issue(&user.username)?;

        tracing::info!(username = %user.username, "Login succeeded, token issued");
        Ok(token)
    }
}
