use std::sync::Arc;

use anyhow::Context;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

use user_crud::{
    infrastructure::{
        config::{load_config, StoreBackend},
        database::DatabaseManager,
        logger::Logger,
        memory::InMemoryUserRepository,
        mongo::MongoUserRepository,
    },
    router, AppState, UserRepository, UserService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config().context("加载配置失败")?;
    Logger::init(&config.logging);

    info!("启动用户管理服务...");
    match source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let (repository, database): (Arc<dyn UserRepository>, Option<DatabaseManager>) =
        match config.database.backend {
            StoreBackend::Mongo => {
                let database = DatabaseManager::connect(&config.database)
                    .await
                    .inspect_err(|e| error!("无法连接数据库: {}", e))
                    .context("连接 MongoDB 失败")?;
                let repository: Arc<dyn UserRepository> =
                    Arc::new(MongoUserRepository::new(database.users()));
                (repository, Some(database))
            }
            StoreBackend::Memory => {
                warn!("使用内存存储，进程退出后数据将丢失");
                let repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
                (repository, None)
            }
        };

    let service = UserService::with_timeout(repository, config.database.operation_timeout());
    let app = router(
        AppState::new(service),
        &config.server.static_dir,
        config.server.request_timeout(),
    );

    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .inspect_err(|e| error!("无法绑定到 {}: {}", address, e))
        .with_context(|| format!("无法绑定到 {}", address))?;

    info!("🚀 服务器运行在 http://{}", address);
    info!("   GET  /               - 用户列表");
    info!("   GET  /create         - 创建表单");
    info!("   POST /create         - 创建用户");
    info!("   GET  /edit/:id       - 编辑表单");
    info!("   POST /update/:id     - 更新用户");
    info!("   GET  /delete/:id     - 删除用户");
    info!("   GET  /search?q=      - 搜索页面");
    info!("   GET  /api/users      - 全部用户 (JSON)");
    info!("   GET  /api/search?q=  - 搜索用户 (JSON)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    if let Some(database) = database {
        database.shutdown().await;
    }
    info!("服务器已关闭");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("收到 Ctrl+C，准备关闭");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("收到 SIGTERM，准备关闭");
            }
            Err(e) => {
                error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
