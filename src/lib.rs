//! # 学校名录
//!
//! 一个小型 Web 服务：注册学校的表单、可搜索的学校列表，以及同一份数据
//! 的 JSON API。所有记录保存在一个命名存储槽里的 JSON 数组中。
//!
//! - `app`：页面、JSON API 处理器、学校存储
//! - `core`：错误、响应包装、中间件
//! - `infrastructure`：存储后端、日志

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use app::AppState;
pub use config::Config;

use app::pages::{add_school, landing, show_schools};
use app::school::handler;

/// 组装全部路由和中间件
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route(
            "/schools",
            get(handler::list_schools)
                .post(handler::create_school)
                .delete(handler::clear_schools),
        )
        .route(
            "/schools/:id",
            get(handler::get_school)
                .put(handler::update_school)
                .patch(handler::update_school)
                .delete(handler::delete_school),
        )
        .route("/images", post(handler::upload_image));

    Router::new()
        .route("/", get(landing::landing))
        .route(
            "/add-school",
            get(add_school::show_form).post(add_school::submit_form),
        )
        .route("/show-schools", get(show_schools::show_schools))
        .route("/health", get(handler::health_check))
        .nest("/api", api)
        .layer(middleware::from_fn(
            crate::core::middleware::request_logging_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
