use std::time::Duration;

use anyhow::Context;
use school_directory::{
    app::school::store::SchoolStore,
    build_router,
    config::load_config,
    infrastructure::{logger::Logger, storage::backend_from_config},
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("加载配置失败")?;
    let _log_guard = Logger::init(&config.logging).context("初始化日志失败")?;

    info!("启动学校名录服务...");

    let store = SchoolStore::new(backend_from_config(&config.storage));
    info!("已加载 {} 所学校", store.list().len());

    let state = AppState::new(store, config.ui.clone());
    let app = build_router(state, Duration::from_secs(config.http.timeout_seconds));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 学校名录服务运行在 http://{}", addr);
    info!("📖 可用端点:");
    info!("   GET    /                 - 首页 ({} 秒后跳转到列表)", config.ui.landing_redirect_seconds);
    info!("   GET    /add-school       - 注册学校表单");
    info!("   GET    /show-schools     - 学校列表 (?search=)");
    info!("   GET    /api/schools      - 获取学校列表");
    info!("   POST   /api/schools      - 添加学校");
    info!("   DELETE /api/schools      - 清空全部学校");
    info!("   GET    /api/schools/:id  - 获取学校");
    info!("   PUT    /api/schools/:id  - 更新学校");
    info!("   DELETE /api/schools/:id  - 删除学校");
    info!("   POST   /api/images       - 获取占位图片地址");
    info!("   GET    /health           - 健康检查");

    axum::serve(listener, app).await.context("服务器运行失败")?;
    Ok(())
}
