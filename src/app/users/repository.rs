//! 用户仓储接口
//!
//! 每个方法对应一次存储调用。超时由服务层统一施加，适配器只负责把底层错误映射为 [`StoreError`]。

use async_trait::async_trait;

use super::model::{NewUser, User, UserFields, UserId};
use crate::core::error::StoreError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 按存储的自然顺序返回全部用户
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// 插入新用户并返回存储分配的标识
    async fn insert(&self, user: NewUser) -> Result<UserId, StoreError>;

    /// 覆盖三个字段，返回是否有记录被匹配
    async fn update(&self, id: UserId, fields: UserFields) -> Result<bool, StoreError>;

    /// 删除记录，返回是否确实删除了一条
    async fn delete(&self, id: UserId) -> Result<bool, StoreError>;

    /// 对 name 或 email 做大小写不敏感的字面子串匹配
    async fn search(&self, term: &str) -> Result<Vec<User>, StoreError>;
}
