//! 认证中间件（每请求一次的令牌拦截器）
//!
//! 提取并验证 Bearer 令牌，把认证结果写入请求扩展。本中间件自身
//! 从不拒绝请求：缺失或无效的令牌一律降级为匿名，由访问策略决定
//! 最终的 401/403。

use crate::{error::AppError, middleware::AppState, models::Role};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

/// 认证上下文（附加到请求扩展）
///
/// 角色来自用户存储而非令牌载荷，角色变更在下一个请求即刻生效。
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthContext>().cloned().ok_or(AppError::Unauthorized)
    }
}

/// 从 Authorization 头提取令牌（"Bearer <token>"）
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

/// 认证上下文中间件
///
/// 状态机：无头部/格式不符 → 匿名；验证失败（过期、签名、格式）→
/// 匿名并记录日志；验证成功 → 按令牌主题从用户存储重新加载用户，
/// 找不到或用户名不一致 → 匿名。
pub async fn auth_context_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    // 认证端点与公开文档无需令牌，直接跳过提取
    let path = req.uri().path();
    if path.starts_with("/auth/") || path == "/api-docs" || path.starts_with("/api-docs/") {
        return next.run(req).await;
    }

    if let Some(token) = extract_token(req.headers()) {
        match state.jwt_service.verify(&token) {
            Ok(subject) => match state.users.find_by_username(&subject).await {
                Ok(Some(user)) if user.username == subject => {
                    tracing::debug!(username = %user.username, role = %user.role, "Token validated");
                    let role = user.role();
                    let auth_context =
                        AuthContext { user_id: user.id, username: user.username, role };
                    req.extensions_mut().insert(auth_context);
                }
                Ok(_) => {
                    tracing::warn!(subject = %subject, "Token subject has no matching user");
                }
                Err(e) => {
                    // 存储故障不等于令牌无效，但同样只能匿名继续
                    tracing::error!(error = %e, "User lookup failed during token validation");
                }
            },
            Err(e) => {
                // 过期与签名错误对外不可区分，只记录内部原因
                tracing::debug!(reason = %e, "Token validation failed");
            }
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer test_token_123".parse().unwrap());

        assert_eq!(extract_token(&headers), Some("test_token_123".to_string()));
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_none());
    }

    #[test]
    fn test_extract_token_invalid_format() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());

        assert!(extract_token(&headers).is_none());
    }
}
