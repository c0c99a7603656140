//! 内存用户仓储，用于本地开发与测试

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::app::users::{
    model::{NewUser, User, UserFields, UserId},
    repository::UserRepository,
};
use crate::core::error::StoreError;

/// 按插入顺序保存用户
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn matches_term(user: &User, needle: &str) -> bool {
    user.name.to_lowercase().contains(needle) || user.email.to_lowercase().contains(needle)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, StoreError> {
        let id = UserId::new();
        self.users.write().await.push(User::from_parts(id, user));
        Ok(id)
    }

    async fn update(&self, id: UserId, fields: UserFields) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.apply(fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }

    async fn search(&self, term: &str) -> Result<Vec<User>, StoreError> {
        let needle = term.to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| matches_term(u, &needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, age: i64) -> UserFields {
        UserFields {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_keeps_order() {
        let repo = InMemoryUserRepository::new();
        let a = repo.insert(fields("A", "a@x.com", 1)).await.unwrap();
        let b = repo.insert(fields("B", "b@x.com", 2)).await.unwrap();
        assert_ne!(a, b);

        let users = repo.list().await.unwrap();
        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_noops() {
        let repo = InMemoryUserRepository::new();
        let missing = UserId::new();

        assert!(!repo.update(missing, fields("X", "x", 0)).await.unwrap());
        assert!(!repo.delete(missing).await.unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_name_or_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(fields("Ann Lee", "lee@example.com", 30)).await.unwrap();
        repo.insert(fields("Bob", "Anna@example.com", 31)).await.unwrap();
        repo.insert(fields("Carl", "carl@example.com", 32)).await.unwrap();

        let found = repo.search("ANN").await.unwrap();
        let names: Vec<_> = found.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ann Lee", "Bob"]);
    }

    #[tokio::test]
    async fn test_search_treats_term_literally() {
        let repo = InMemoryUserRepository::new();
        repo.insert(fields("a.b", "dot@x.com", 1)).await.unwrap();
        repo.insert(fields("axb", "x@x.com", 2)).await.unwrap();

        let found = repo.search("a.b").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "a.b");
    }
}
