//! 食品杂货电商系统主入口

use grocery_system::{
    auth::{JwtService, PasswordHasher},
    config::AppConfig,
    db,
    handlers::health,
    middleware::AppState,
    repository::{
        CartStore, GroceryStore, MemoryCartStore, MemoryGroceryStore, MemoryUserStore,
        PgCartStore, PgGroceryStore, PgUserStore, UserStore,
    },
    routes,
    services::{AuthService, CartService, GroceryService},
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("grocery-system {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 生产环境应该直接设置环境变量，不依赖 .env 文件
    if let Ok(path) = std::env::var("GROCERY_ENV") {
        dotenv::from_filename(format!(".env.{}", path)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    // 设置应用启动时间
    health::set_start_time();

    // 1. 加载配置。签名密钥与令牌有效期缺失时在这里直接失败，
    //    进程不会开始对外服务。
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Grocery System starting...");

    // 3. 签名密钥推导。密钥不足 32 字节同样是致命错误。
    let jwt_service = Arc::new(JwtService::from_config(&config)?);

    // 4. 存储选择：配置了数据库 URL 用 PostgreSQL，否则用内存存储
    let (users, groceries, carts): (
        Arc<dyn UserStore>,
        Arc<dyn GroceryStore>,
        Arc<dyn CartStore>,
    ) = if config.database.url.is_some() {
        let db_pool = db::create_pool(&config.database).await?;
        db::run_migrations(&db_pool).await?;
        tracing::info!("Database initialized");
        (
            Arc::new(PgUserStore::new(db_pool.clone())),
            Arc::new(PgGroceryStore::new(db_pool.clone())),
            Arc::new(PgCartStore::new(db_pool)),
        )
    } else {
        tracing::warn!("No database URL configured, using in-memory stores (data is volatile)");
        (
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryGroceryStore::new()),
            Arc::new(MemoryCartStore::new()),
        )
    };

    // 5. 构建服务与应用状态
    let hasher = Arc::new(PasswordHasher::new());
    let auth_service =
        Arc::new(AuthService::new(users.clone(), hasher, jwt_service.clone()));
    let grocery_service = Arc::new(GroceryService::new(groceries));
    let cart_service = Arc::new(CartService::new(carts, grocery_service.clone()));

    let app_state = Arc::new(AppState {
        config: config.clone(),
        jwt_service,
        auth_service,
        grocery_service,
        cart_service,
        users,
    });

    // 6. 构建路由
    let app = routes::create_router(app_state);

    // 7. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 8. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    // 立即开始优雅关闭；超时仍未退出则强制结束进程
    tokio::spawn(async move {
        tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
        tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        std::process::exit(1);
    });
}

/// 打印帮助信息
fn print_help() {
    println!("grocery-system {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: grocery-system [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 GROCERY_ 前缀的环境变量完成");
    println!("  必需: GROCERY_SECURITY__JWT_SECRET, GROCERY_SECURITY__TOKEN_TTL_MS");
    println!("  可选: GROCERY_DATABASE__URL（未设置时使用内存存储）");
}
