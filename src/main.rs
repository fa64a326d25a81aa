//! 营销站点后台服务主入口

use skyhigh_site::{
    auth::TokenService,
    config::AppConfig,
    db,
    handlers::health,
    middleware::AppState,
    routes,
    services::{AuditService, AuthService},
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
                println!("skyhigh-site {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            "seed-admin" => {
                let (user_id, password) = match (args.get(2), args.get(3)) {
                    (Some(u), Some(p)) => (u.clone(), p.clone()),
                    _ => {
                        eprintln!("用法: skyhigh-site seed-admin <user-id> <password>");
                        std::process::exit(1);
                    }
                };
                load_dotenv();
                return seed_admin(&user_id, &password).await;
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    load_dotenv();

    // 设置应用启动时间
    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config.logging)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Skyhigh site starting...");

    // 3. 数据库连接池 + 迁移
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;
    db::record_pool_metrics(&db_pool);

    tracing::info!("Database initialized");

    // 4. 构建应用状态
    let token_service = Arc::new(TokenService::from_config(&config.security)?);
    let audit_service = Arc::new(AuditService::new(db_pool.clone()));
    let auth_service = Arc::new(AuthService::new(
        db_pool.clone(),
        token_service.clone(),
        Arc::new(config.clone()),
        audit_service.clone(),
    ));

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool,
        token_service,
        auth_service,
        audit_service,
    });

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 加载 .env 文件（开发环境）
/// 按优先级加载：.env.local > .env.development > .env
/// 生产环境应该直接设置环境变量，不依赖 .env 文件
fn load_dotenv() {
    if let Ok(profile) = std::env::var("SKYHIGH_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }
}

/// 创建初始管理员账号
///
/// 账号已存在时不做任何修改。
async fn seed_admin(user_id: &str, password: &str) -> anyhow::Result<()> {
    use skyhigh_site::auth::PasswordHasher;
    use skyhigh_site::repository::AdminRepository;

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    let violations =
        skyhigh_site::auth::password::policy_violations(password, &config.security);
    if !violations.is_empty() {
        eprintln!("密码不满足强度要求: {}", violations.join(". "));
        std::process::exit(1);
    }

    let pool = db::create_pool(&config.database).await?;
    db::run_migrations(&pool).await?;

    let repo = AdminRepository::new(pool.clone());
    if repo.find_by_user_id(user_id).await?.is_some() {
        println!("管理员 {} 已存在，未做修改", user_id);
        return Ok(());
    }

    let hasher = PasswordHasher::new();
    let password_hash = hasher.hash(password)?;

    sqlx::query("INSERT INTO admins (user_id, password_hash) VALUES ($1, $2)")
        .bind(user_id.trim().to_lowercase())
        .bind(&password_hash)
        .execute(&pool)
        .await?;

    println!("管理员 {} 创建成功，请尽快登录并修改密码", user_id);
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
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
}

/// 打印帮助信息
fn print_help() {
    println!("skyhigh-site {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: skyhigh-site [选项]");
    println!();
    println!("选项:");
    println!("  --version                        打印版本信息并退出");
    println!("  --help                           打印此帮助信息并退出");
    println!("  seed-admin <user-id> <password>  创建初始管理员账号");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 SKYHIGH_ 前缀的环境变量完成");
    println!("  必须设置 SKYHIGH_DATABASE__URL 和 SKYHIGH_SECURITY__JWT_SECRET");
}
