//! 基础设施层：配置、日志与存储适配器

pub mod config;
pub mod database;
pub mod logger;
pub mod memory;
pub mod mongo;
