//! 应用层：路由表

pub mod users;

use std::path::Path;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::core::middleware::request_logging_middleware;
use users::handler::{self, AppState};

/// 构建完整路由
///
/// `static_dir` 挂载到 `/static`，`request_timeout` 是整个请求的兜底超时。
pub fn router(state: AppState, static_dir: impl AsRef<Path>, request_timeout: Duration) -> Router {
    Router::new()
        // 页面
        .route("/", get(handler::index))
        .route("/create", get(handler::create_form).post(handler::create_user))
        .route("/edit/:id", get(handler::edit_form))
        .route("/update/:id", post(handler::update_user))
        .route("/delete/:id", get(handler::delete_user))
        .route("/search", get(handler::search))
        // JSON API
        .route("/api/users", get(handler::list_users_api))
        .route("/api/search", get(handler::search_users_api))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
