//! API 文档处理器
//! 对外发布的静态 API 描述（/api-docs），无需认证即可访问

use axum::Json;
use serde_json::{json, Value};

/// API 描述文档
///
/// 覆盖认证流程与各端点的访问要求。内容是静态的，
/// 不做运行时的接口扫描。
pub async fn api_docs() -> Json<Value> {
    Json(json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Grocery System API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "JWT-secured grocery store backend. \
                Register via /auth/register, login via /auth/login to obtain a token, \
                then send it as 'Authorization: Bearer <token>'. \
                Product reads are public; product writes require the ADMIN role; \
                the cart requires any authenticated user."
        },
        "paths": {
            "/auth/register": {"post": {"summary": "Register a new user", "security": []}},
            "/auth/login": {"post": {"summary": "Authenticate and receive a JWT", "security": []}},
            "/api/groceries": {
                "get": {"summary": "List products", "security": []},
                "post": {"summary": "Create product (ADMIN only)"}
            },
            "/api/groceries/{id}": {
                "get": {"summary": "Get product by id", "security": []},
                "put": {"summary": "Update product (ADMIN only)"},
                "delete": {"summary": "Delete product (ADMIN only)"}
            },
            "/api/cart/add": {"post": {"summary": "Add item to cart"}},
            "/api/cart": {"get": {"summary": "View cart items"}},
            "/api/cart/remove/{itemId}": {"delete": {"summary": "Remove item from cart"}},
            "/api/cart/checkout": {"post": {"summary": "Checkout and clear the cart"}}
        },
        "components": {
            "securitySchemes": {
                "bearerAuth": {"type": "http", "scheme": "bearer", "bearerFormat": "JWT"}
            }
        },
        "security": [{"bearerAuth": []}]
    }))
}
