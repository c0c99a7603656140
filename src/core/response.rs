//! 核心响应处理模块

use axum::{
    http::StatusCode,
    response::{Html, Redirect},
};
use serde::Serialize;

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

/// HTML 转义
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 写操作成功后回到列表页 (303 See Other)
pub fn redirect_to_index() -> Redirect {
    Redirect::to("/")
}

/// 简单的 HTML 错误页
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let reason = status.canonical_reason().unwrap_or("Error");
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{code} {reason}</title>\
         <link rel=\"stylesheet\" href=\"/static/css/style.css\"></head>\n\
         <body><main class=\"container\"><h1>{code} {reason}</h1><p>{message}</p>\
         <p><a href=\"/\">Back to users</a></p></main></body>\n</html>\n",
        code = status.as_u16(),
        reason = reason,
        message = escape(message),
    ))
}
