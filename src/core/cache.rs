use crate::domain::model::Item;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Process-wide read-through cache of fetched collections, keyed by collection
/// name. Successful writes invalidate the entry so the next load goes back to
/// the store; nothing here expires on its own.
#[derive(Clone, Default)]
pub struct CollectionCache {
    entries: Arc<Mutex<HashMap<String, Vec<Item>>>>,
}

impl CollectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, collection: &str) -> Option<Vec<Item>> {
        let entries = self.entries.lock().await;
        entries.get(collection).cloned()
    }

    pub async fn set(&self, collection: &str, items: Vec<Item>) {
        let mut entries = self.entries.lock().await;
        entries.insert(collection.to_string(), items);
    }

    pub async fn invalidate(&self, collection: &str) {
        let mut entries = self.entries.lock().await;
        if entries.remove(collection).is_some() {
            tracing::debug!("cache invalidated for '{collection}'");
        }
    }
}
