//! 用户业务服务
//!
//! 先完成输入校验，再发起恰好一次仓储调用；每次调用都受固定超时约束。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::{
    model::{SearchResults, User, UserForm, UserId},
    repository::UserRepository,
};
use crate::core::error::{CoreError, StoreError};

pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    timeout: Duration,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self::with_timeout(repository, DEFAULT_OPERATION_TIMEOUT)
    }

    pub fn with_timeout(repository: Arc<dyn UserRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                operation,
                timeout: self.timeout,
            }),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.bounded("list", self.repository.list()).await?)
    }

    /// 编辑页使用，记录不存在时返回 404
    pub async fn get_user(&self, raw_id: &str) -> Result<User, CoreError> {
        let id: UserId = raw_id.parse()?;
        self.bounded("find_by_id", self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))
    }

    pub async fn create_user(&self, form: UserForm) -> Result<UserId, CoreError> {
        let user = form.parse()?;
        let id = self.bounded("insert", self.repository.insert(user)).await?;
        debug!("创建用户: {}", id);
        Ok(id)
    }

    /// 记录不存在时静默成功，与删除保持一致
    pub async fn update_user(&self, raw_id: &str, form: UserForm) -> Result<(), CoreError> {
        let id: UserId = raw_id.parse()?;
        let fields = form.parse()?;
        let matched = self
            .bounded("update", self.repository.update(id, fields))
            .await?;
        if !matched {
            warn!("更新的用户不存在: {}", id);
        }
        Ok(())
    }

    pub async fn delete_user(&self, raw_id: &str) -> Result<(), CoreError> {
        let id: UserId = raw_id.parse()?;
        let deleted = self.bounded("delete", self.repository.delete(id)).await?;
        if !deleted {
            debug!("删除的用户不存在: {}", id);
        }
        Ok(())
    }

    /// 空查询不访问存储，返回 `None`
    pub async fn search_users(&self, query: &str) -> Result<Option<SearchResults>, CoreError> {
        if query.is_empty() {
            return Ok(None);
        }
        let users = self.bounded("search", self.repository.search(query)).await?;
        Ok(Some(SearchResults::new(query.to_string(), users)))
    }
}
