//! 访问策略
//!
//! (HTTP 方法, 路径) → 所需角色的静态有序规则表，首条匹配生效。
//! 这是唯一把缺失/不足的授权转换为 401/403 的地方。

use crate::{auth::middleware::AuthContext, error::AppError, models::Role};
use axum::{extract::Request, http::Method, middleware::Next, response::Response};
use once_cell::sync::Lazy;

/// 规则允许的访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// 公开，无需令牌
    Public,
    /// 任意已认证用户
    Authenticated,
    /// 要求特定角色
    Role(Role),
}

/// 策略评估结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyOutcome {
    /// 放行
    Permit,
    /// 需要认证但请求是匿名的 → 401
    Unauthenticated,
    /// 已认证但角色不足 → 403
    Forbidden,
}

struct Rule {
    /// None 表示匹配所有方法
    methods: Option<&'static [Method]>,
    /// 路径前缀，匹配自身及其子路径
    path_prefix: &'static str,
    access: Access,
}

impl Rule {
    fn matches(&self, method: &Method, path: &str) -> bool {
        if let Some(methods) = self.methods {
            if !methods.contains(method) {
                return false;
            }
        }
        path == self.path_prefix
            || (path.len() > self.path_prefix.len()
                && path.starts_with(self.path_prefix)
                && path.as_bytes()[self.path_prefix.len()] == b'/')
    }
}

const MUTATING: &[Method] = &[Method::POST, Method::PUT, Method::DELETE];
const READ_ONLY: &[Method] = &[Method::GET];

/// 有序规则表。顺序即语义：重叠的规则不可合并。
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        // 1. 注册与登录
        Rule { methods: None, path_prefix: "/auth", access: Access::Public },
        // 2. 对外发布的 API 文档与健康检查
        Rule { methods: None, path_prefix: "/api-docs", access: Access::Public },
        Rule { methods: None, path_prefix: "/health", access: Access::Public },
        // 3. 商品目录只读访问
        Rule { methods: Some(READ_ONLY), path_prefix: "/api/groceries", access: Access::Public },
        // 4. 商品写操作要求 ADMIN
        Rule {
            methods: Some(MUTATING),
            path_prefix: "/api/groceries",
            access: Access::Role(Role::Admin),
        },
    ]
});

/// 评估一次请求的访问决定。
///
/// 纯函数：除规则表外不依赖任何状态。规则表未命中时落入
/// "其余路径要求已认证" 的兜底规则，因此对所有输入都是全函数。
pub fn evaluate(method: &Method, path: &str, auth: Option<&AuthContext>) -> PolicyOutcome {
    for rule in RULES.iter() {
        if !rule.matches(method, path) {
            continue;
        }
        return match (rule.access, auth) {
            (Access::Public, _) => PolicyOutcome::Permit,
            (Access::Authenticated, Some(_)) => PolicyOutcome::Permit,
            (Access::Role(required), Some(ctx)) => {
                if ctx.role == required {
                    PolicyOutcome::Permit
                } else {
                    PolicyOutcome::Forbidden
                }
            }
            (_, None) => PolicyOutcome::Unauthenticated,
        };
    }

    // 5. 其余路径：任意已认证用户
    match auth {
        Some(_) => PolicyOutcome::Permit,
        None => PolicyOutcome::Unauthenticated,
    }
}

/// 访问策略中间件
///
/// 读取认证中间件写入的 AuthContext 并执行规则表。
pub async fn access_policy_middleware(req: Request, next: Next) -> Result<Response, AppError> {
    let auth = req.extensions().get::<AuthContext>();

    match evaluate(req.method(), req.uri().path(), auth) {
        PolicyOutcome::Permit => Ok(next.run(req).await),
        PolicyOutcome::Unauthenticated => Err(AppError::Unauthorized),
        PolicyOutcome::Forbidden => Err(AppError::Forbidden),
    }
}
