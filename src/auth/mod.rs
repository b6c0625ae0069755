//! Authentication and authorization module

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;

pub use jwt::{Claims, JwtService, TokenError};
pub use middleware::{auth_context_middleware, extract_token, AuthContext};
pub use password::PasswordHasher;
pub use policy::{access_policy_middleware, evaluate, PolicyOutcome};
