//! 核心错误处理模块

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use super::response::{error_page, ErrorResponse};

/// 存储层错误
///
/// 由仓储适配器产生，HTTP 层统一映射为 500。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connection(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("store operation `{operation}` timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },
}

/// 核心错误类型
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    pub fn invalid_id() -> Self {
        Self::BadRequest("Invalid ID".to_string())
    }

    pub fn invalid_age() -> Self {
        Self::BadRequest("Invalid age".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 面向客户端的错误码与消息，存储错误不向外暴露细节
    fn public_parts(&self) -> (&'static str, String) {
        match self {
            CoreError::BadRequest(msg) => ("BAD_REQUEST", msg.clone()),
            CoreError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            CoreError::Store(err) => {
                error!("存储操作失败: {}", err);
                ("INTERNAL_SERVER_ERROR", "Database error".to_string())
            }
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = self.public_parts();

        let error_response = ErrorResponse {
            error: error.to_string(),
            message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

/// 页面路由使用的错误包装，以 HTML 形式返回相同状态码
#[derive(Debug)]
pub struct PageError(pub CoreError);

impl From<CoreError> for PageError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        Self(CoreError::Store(err))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let (_, message) = self.0.public_parts();
        (status, error_page(status, &message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(CoreError::invalid_id().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CoreError::NotFound("User not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        let timeout = StoreError::Timeout {
            operation: "list",
            timeout: Duration::from_secs(10),
        };
        assert_eq!(
            CoreError::from(timeout).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_hides_details() {
        let err = CoreError::from(StoreError::Query("auth failed for admin".into()));
        let (code, message) = err.public_parts();
        assert_eq!(code, "INTERNAL_SERVER_ERROR");
        assert!(!message.contains("admin"));
    }

    #[test]
    fn test_page_error_keeps_status() {
        let response = PageError::from(CoreError::invalid_age()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
