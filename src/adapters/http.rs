use crate::domain::model::Item;
use crate::domain::ports::{ConfigStore, StoreConfig};
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// ConfigStore implementation speaking JSON over HTTP.
///
/// Collections map to `{base_url}/{collection}`, items to
/// `{base_url}/{collection}/{id}`. Any non-2xx status is a hard failure for
/// that call; 404 is distinguished so a stale item (deleted by another admin
/// session) can be told apart from a transport problem.
pub struct HttpConfigStore {
    client: Client,
    base_url: String,
}

impl HttpConfigStore {
    pub fn new(config: &impl StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .map_err(AdminError::ApiError)?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    fn item_url(&self, collection: &str, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }
}

#[async_trait]
impl ConfigStore for HttpConfigStore {
    async fn fetch(&self, collection: &str) -> Result<Vec<Item>> {
        let url = self.collection_url(collection);
        tracing::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;

        tracing::debug!("GET {url} -> {}", response.status());
        if !response.status().is_success() {
            return Err(AdminError::FetchFailure {
                collection: collection.to_string(),
                status: response.status().as_u16(),
            });
        }

        let items: Vec<Item> = response.json().await?;
        Ok(items)
    }

    async fn update(&self, collection: &str, id: i64, patch: serde_json::Value) -> Result<Item> {
        let url = self.item_url(collection, id);
        tracing::debug!("PUT {url} {patch}");
        let response = self.client.put(&url).json(&patch).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AdminError::StaleItem {
                collection: collection.to_string(),
                id,
            });
        }
        let response = response.error_for_status()?;
        let item: Item = response.json().await?;
        Ok(item)
    }

    async fn create(&self, collection: &str, fields: serde_json::Value) -> Result<Item> {
        let url = self.collection_url(collection);
        tracing::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(&fields)
            .send()
            .await?
            .error_for_status()?;
        let item: Item = response.json().await?;
        Ok(item)
    }

    async fn delete(&self, collection: &str, id: i64) -> Result<()> {
        let url = self.item_url(collection, id);
        tracing::debug!("DELETE {url}");
        let response = self.client.delete(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AdminError::StaleItem {
                collection: collection.to_string(),
                id,
            });
        }
        response.error_for_status()?;
        Ok(())
    }
}
