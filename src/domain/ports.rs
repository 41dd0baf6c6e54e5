use crate::domain::model::Item;
use crate::utils::error::Result;
use async_trait::async_trait;

/// The backend persistence contract, one instance per site.
///
/// Collections are addressed by name; the store is a black box that either
/// answers with JSON or fails. `update` takes a partial body and touches only
/// the supplied fields.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn fetch(&self, collection: &str) -> Result<Vec<Item>>;
    async fn update(&self, collection: &str, id: i64, patch: serde_json::Value) -> Result<Item>;
    async fn create(&self, collection: &str, fields: serde_json::Value) -> Result<Item>;
    async fn delete(&self, collection: &str, id: i64) -> Result<()>;
}

pub trait StoreConfig: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    /// Fields that must be present and non-empty when creating or updating
    /// items of the given collection. Empty when no rules are configured.
    fn required_fields(&self, collection: &str) -> &[String];
}
