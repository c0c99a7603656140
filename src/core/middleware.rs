//! 核心中间件模块

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 请求日志中间件
///
/// 为每个请求分配 `x-request-id`（沿用客户端传入的值），并记录方法、路径、状态码与耗时。
pub async fn request_logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let request_id = match req.headers().get(REQUEST_ID_HEADER) {
        Some(value) => value.clone(),
        None => {
            let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            req.headers_mut()
                .insert(REQUEST_ID_HEADER, generated.clone());
            generated
        }
    };

    let mut response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    let request_id_str = request_id.to_str().unwrap_or("-").to_string();
    if status.is_server_error() {
        warn!(
            "{} {} - {} - {}ms - request_id: {}",
            method,
            uri,
            status,
            duration.as_millis(),
            request_id_str
        );
    } else {
        info!(
            "{} {} - {} - {}ms - request_id: {}",
            method,
            uri,
            status,
            duration.as_millis(),
            request_id_str
        );
    }

    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}
