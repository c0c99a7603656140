//! 数据库基础设施

use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use std::time::Duration;
use tracing::info;

use super::{config::DatabaseConfig, mongo::UserDocument};
use crate::core::error::StoreError;

/// 持有长生命周期的 MongoDB 客户端
///
/// `Client` 内部自带连接池，可以安全地在并发请求间克隆共享。
pub struct DatabaseManager {
    client: Client,
    database: String,
    collection: String,
}

impl DatabaseManager {
    /// 建立连接并执行 ping，超过 `timeout` 视为失败
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let timeout = config.operation_timeout();
        info!("连接数据库: {}", config.redacted_uri());

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client =
            Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;

        let manager = Self {
            client,
            database: config.database.clone(),
            collection: config.collection.clone(),
        };
        manager.ping(timeout).await?;
        info!("数据库连接成功");

        Ok(manager)
    }

    pub async fn ping(&self, timeout: Duration) -> Result<(), StoreError> {
        let database = self.client.database(&self.database);
        let ping = database.run_command(doc! { "ping": 1 });

        match tokio::time::timeout(timeout, ping).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(StoreError::Connection(e.to_string())),
            Err(_) => Err(StoreError::Timeout {
                operation: "ping",
                timeout,
            }),
        }
    }

    pub fn users(&self) -> Collection<UserDocument> {
        self.client
            .database(&self.database)
            .collection::<UserDocument>(&self.collection)
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}
