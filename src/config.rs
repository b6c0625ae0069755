//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:8090"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接 URL（使用 Secret 包装，防止日志泄露）
    /// 未配置时使用内存存储（开发/演示模式）
    pub url: Option<Secret<String>>,
    /// 最大连接数
    pub max_connections: u32,
    /// 最小连接数
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
    /// 空闲连接超时时间（秒）
    pub idle_timeout_secs: u64,
    /// 连接最大生命周期（秒）
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 签名密钥（Base64 或原始文本，使用 Secret 包装防止日志泄露）
    /// 无默认值：缺失时启动失败
    pub jwt_secret: Secret<String>,
    /// 令牌有效期（毫秒），无默认值：缺失时启动失败
    pub token_ttl_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    ///
    /// `security.jwt_secret` 和 `security.token_ttl_ms` 没有默认值，
    /// 未设置时反序列化失败，进程不得启动。
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("server.addr", "0.0.0.0:8090")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?;

        // 从环境变量加载配置（前缀为 GROCERY_）
        settings = settings.add_source(
            Environment::with_prefix("GROCERY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    ///
    /// 密钥长度在 JwtService 初始化时检查（Base64 解码后才知道实际字节数）。
    fn validate(&self) -> Result<(), ConfigError> {
        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // 验证数据库连接池配置
        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::Message(
                "max_connections must be >= min_connections".to_string(),
            ));
        }

        // 验证令牌有效期（至少 1 秒）
        if self.security.token_ttl_ms < 1000 {
            return Err(ConfigError::Message(
                "token_ttl_ms must be at least 1000 (1 second)".to_string(),
            ));
        }

        // 密钥不能为空字符串
        if self.security.jwt_secret.expose_secret().is_empty() {
            return Err(ConfigError::Message("jwt_secret must not be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("GROCERY_SECURITY__JWT_SECRET");
        std::env::remove_var("GROCERY_SECURITY__TOKEN_TTL_MS");
        std::env::remove_var("GROCERY_DATABASE__URL");
        std::env::remove_var("GROCERY_LOGGING__LEVEL");
        std::env::remove_var("GROCERY_SERVER__ADDR");
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();
        std::env::set_var(
            "GROCERY_SECURITY__JWT_SECRET",
            "test-secret-key-for-testing-only-min-32-chars",
        );
        std::env::set_var("GROCERY_SECURITY__TOKEN_TTL_MS", "600000");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:8090");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.security.token_ttl_ms, 600_000);
        assert!(config.database.url.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_missing_secret_is_fatal() {
        clear_env();
        std::env::set_var("GROCERY_SECURITY__TOKEN_TTL_MS", "600000");

        let result = AppConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_missing_ttl_is_fatal() {
        clear_env();
        std::env::set_var(
            "GROCERY_SECURITY__JWT_SECRET",
            "test-secret-key-for-testing-only-min-32-chars",
        );

        let result = AppConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_log_level() {
        clear_env();
        std::env::set_var(
            "GROCERY_SECURITY__JWT_SECRET",
            "test-secret-key-for-testing-only-min-32-chars",
        );
        std::env::set_var("GROCERY_SECURITY__TOKEN_TTL_MS", "600000");
        std::env::set_var("GROCERY_LOGGING__LEVEL", "invalid");

        let result = AppConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_ttl_too_small() {
        clear_env();
        std::env::set_var(
            "GROCERY_SECURITY__JWT_SECRET",
            "test-secret-key-for-testing-only-min-32-chars",
        );
        std::env::set_var("GROCERY_SECURITY__TOKEN_TTL_MS", "500");

        let result = AppConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }
}
