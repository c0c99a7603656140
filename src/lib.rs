//! # 用户管理 CRUD 服务
//!
//! 基于 Axum 与 MongoDB 的用户增删改查应用，提供：
//! - HTML 页面：列表、创建、编辑、删除、搜索
//! - JSON 接口：`/api/users`、`/api/search`
//! - `/static` 静态资源
//!
//! 分层结构：
//! - `app`：路由、处理器、业务服务、页面渲染
//! - `core`：错误类型、响应辅助、中间件
//! - `infrastructure`：配置、日志、存储适配器

pub mod app;
pub mod core;
pub mod infrastructure;

pub use crate::app::router;
pub use crate::app::users::{
    handler::AppState,
    model::{User, UserId},
    repository::UserRepository,
    service::UserService,
};
pub use crate::core::error::{CoreError, StoreError};
