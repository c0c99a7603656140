//! MongoDB 用户仓储

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    Collection,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::app::users::{
    model::{NewUser, User, UserFields, UserId},
    repository::UserRepository,
};
use crate::core::error::StoreError;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

/// 集合中的文档结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "integral_age")]
    pub age: i64,
}

/// 年龄字段接受 int32、int64 以及无小数部分的 double
fn integral_age<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::Int32(value) => Ok(i64::from(value)),
        Bson::Int64(value) => Ok(value),
        Bson::Double(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(value as i64)
        }
        other => Err(de::Error::custom(format!(
            "age must be an integer, got {}",
            other
        ))),
    }
}

impl UserDocument {
    fn into_user(self) -> Result<User, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Query("document without _id".to_string()))?;
        Ok(User {
            id: UserId::from(id),
            name: self.name,
            email: self.email,
            age: self.age,
        })
    }
}

impl From<NewUser> for UserDocument {
    fn from(user: NewUser) -> Self {
        Self {
            id: None,
            name: user.name,
            email: user.email,
            age: user.age,
        }
    }
}

/// 以字面子串构造大小写不敏感的 `$or` 过滤条件
pub fn search_filter(term: &str) -> Document {
    let pattern = regex::escape(term);
    doc! {
        "$or": [
            { "name": { "$regex": pattern.as_str(), "$options": "i" } },
            { "email": { "$regex": pattern.as_str(), "$options": "i" } },
        ]
    }
}

fn id_filter(id: UserId) -> Document {
    doc! { "_id": id.object_id() }
}

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<User>, StoreError> {
        let cursor = self.collection.find(filter).await?;
        let documents: Vec<UserDocument> = cursor.try_collect().await?;
        documents.into_iter().map(UserDocument::into_user).collect()
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.find_many(doc! {}).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.collection
            .find_one(id_filter(id))
            .await?
            .map(UserDocument::into_user)
            .transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, StoreError> {
        let result = self.collection.insert_one(UserDocument::from(user)).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Query(format!("unexpected inserted id: {}", result.inserted_id))
        })?;
        debug!("插入用户文档: {}", id);
        Ok(UserId::from(id))
    }

    async fn update(&self, id: UserId, fields: UserFields) -> Result<bool, StoreError> {
        let update = doc! {
            "$set": {
                "name": fields.name,
                "email": fields.email,
                "age": fields.age,
            }
        };
        let result = self.collection.update_one(id_filter(id), update).await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: UserId) -> Result<bool, StoreError> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }

    async fn search(&self, term: &str) -> Result<Vec<User>, StoreError> {
        self.find_many(search_filter(term)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_escapes_metacharacters() {
        let filter = search_filter("a.b+(c)");
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);

        let name = clauses[0].as_document().unwrap().get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), r"a\.b\+\(c\)");
        assert_eq!(name.get_str("$options").unwrap(), "i");

        let email = clauses[1].as_document().unwrap().get_document("email").unwrap();
        assert_eq!(email.get_str("$regex").unwrap(), r"a\.b\+\(c\)");
    }

    #[test]
    fn test_new_document_has_no_id() {
        let doc = UserDocument::from(UserFields {
            name: "Bob".into(),
            email: "bob@x.com".into(),
            age: 30,
        });
        let bson = mongodb::bson::to_document(&doc).unwrap();
        assert!(!bson.contains_key("_id"));
        assert_eq!(bson.get_i64("age").unwrap(), 30);
    }

    #[test]
    fn test_age_accepts_integral_numbers() {
        let id = ObjectId::new();
        for age in [Bson::Int32(30), Bson::Int64(30), Bson::Double(30.0)] {
            let doc: UserDocument = mongodb::bson::from_document(doc! {
                "_id": id,
                "name": "Bob",
                "email": "bob@x.com",
                "age": age,
            })
            .unwrap();
            assert_eq!(doc.age, 30);
        }
    }

    #[test]
    fn test_age_rejects_fractional_and_non_numeric() {
        for age in [Bson::Double(30.5), Bson::String("30".into())] {
            let result = mongodb::bson::from_document::<UserDocument>(doc! {
                "_id": ObjectId::new(),
                "name": "Bob",
                "email": "bob@x.com",
                "age": age,
            });
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_age_defaults_when_missing() {
        let doc: UserDocument =
            mongodb::bson::from_document(doc! { "_id": ObjectId::new(), "name": "Bob" }).unwrap();
        assert_eq!(doc.age, 0);
    }

    #[test]
    fn test_document_without_id_is_rejected() {
        let doc = UserDocument {
            id: None,
            name: "x".into(),
            email: "y".into(),
            age: 1,
        };
        assert!(doc.into_user().is_err());
    }
}
