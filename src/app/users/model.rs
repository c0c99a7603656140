//! 用户数据模型

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::error::CoreError;

/// 用户标识，由存储在插入时分配
///
/// JSON 中表现为 24 位十六进制字符串。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(ObjectId);

impl UserId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for UserId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| CoreError::invalid_id())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl User {
    pub fn from_parts(id: UserId, fields: UserFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            age: fields.age,
        }
    }

    pub fn apply(&mut self, fields: UserFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.age = fields.age;
    }
}

/// 已校验的用户字段，创建与更新时整体写入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// 新建用户，尚无标识
pub type NewUser = UserFields;

/// 创建 / 编辑表单
///
/// 缺失的字段按空字符串处理；`age` 保留原始文本，由 [`UserForm::parse`] 校验。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: String,
}

impl UserForm {
    pub fn parse(self) -> Result<UserFields, CoreError> {
        let age = self
            .age
            .parse::<i64>()
            .map_err(|_| CoreError::invalid_age())?;

        Ok(UserFields {
            name: self.name,
            email: self.email,
            age,
        })
    }
}

/// 搜索查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// 搜索页数据
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub users: Vec<User>,
    pub query: String,
    pub count: usize,
}

impl SearchResults {
    pub fn new(query: String, users: Vec<User>) -> Self {
        Self {
            count: users.len(),
            users,
            query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(age: &str) -> UserForm {
        UserForm {
            name: "Bob".to_string(),
            email: "bob@x.com".to_string(),
            age: age.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_age() {
        let fields = form("30").parse().unwrap();
        assert_eq!(fields.age, 30);
        assert_eq!(fields.name, "Bob");

        assert_eq!(form("-3").parse().unwrap().age, -3);
        assert_eq!(form("+7").parse().unwrap().age, 7);
    }

    #[test]
    fn test_parse_invalid_age() {
        for age in ["abc", "", " 30", "30.5", "1e3"] {
            let err = form(age).parse().unwrap_err();
            assert!(matches!(err, CoreError::BadRequest(ref msg) if msg == "Invalid age"));
        }
    }

    #[test]
    fn test_user_id_parsing() {
        let id: UserId = "65f1a2b3c4d5e6f708192a3b".parse().unwrap();
        assert_eq!(id.to_string(), "65f1a2b3c4d5e6f708192a3b");

        assert!("not-an-id".parse::<UserId>().is_err());
        assert!("65f1a2b3c4d5e6f708192a3".parse::<UserId>().is_err());
        assert!("zzf1a2b3c4d5e6f708192a3b".parse::<UserId>().is_err());
    }

    #[test]
    fn test_user_json_shape() {
        let id: UserId = "65f1a2b3c4d5e6f708192a3b".parse().unwrap();
        let user = User {
            id,
            name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            age: 41,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "_id": "65f1a2b3c4d5e6f708192a3b",
                "name": "Ann Lee",
                "email": "ann@example.com",
                "age": 41
            })
        );
    }
}
