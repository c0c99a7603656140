//! 用户管理

pub mod handler;
pub mod model;
pub mod repository;
pub mod service;
pub mod view;
