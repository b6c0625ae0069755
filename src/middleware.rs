//! HTTP 中间件与应用状态
//! 请求追踪

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// 应用状态
///
/// AppState 内部使用 Arc 包装服务,这样:
/// 1. 多个请求可以共享服务实例
/// 2. Clone 成本低廉(Arc 是指针拷贝)
///
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::AppConfig,
    pub jwt_service: Arc<crate::auth::JwtService>,
    pub auth_service: Arc<crate::services::AuthService>,
    pub grocery_service: Arc<crate::services::GroceryService>,
    pub cart_service: Arc<crate::services::CartService>,
    /// 认证中间件按令牌主题逐请求重查角色时使用
    pub users: Arc<dyn crate::repository::UserStore>,
}

/// 请求追踪中间件
/// 为每个请求生成 request_id，记录方法、路径、状态码与耗时
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let request_id = extract_or_generate_request_id(req.headers());
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let start = Instant::now();

    let span = tracing::info_span!("request", %method, %path, %request_id);
    let mut response = next.run(req).instrument(span).await;

    let latency_ms = start.elapsed().as_millis();

    tracing::info!(
        %method,
        %path,
        %request_id,
        status = response.status().as_u16(),
        latency_ms,
        "Request completed"
    );

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// 提取或生成请求 ID
fn extract_or_generate_request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
