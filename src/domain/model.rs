use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of a content collection (testimonial, contact button, service...).
///
/// The backend assigns `id` and never changes it. `order` drives the display
/// sequence; collection-specific fields are carried opaquely so the editor
/// works for every collection the site defines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(default)]
    pub order: i64,
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

fn default_active() -> bool {
    true
}

/// A drag gesture distilled to its outcome. Any UI layer that can say
/// "this item wants to be at that index" can drive the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderRequest {
    pub item_id: i64,
    pub target_index: usize,
}

/// Partial order update for a single item, as sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderWrite {
    pub id: i64,
    pub order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResult {
    pub id: i64,
    pub ok: bool,
}

/// What a finished persist cycle amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Every changed item was written and the server state re-synced.
    Clean { writes: usize },
    /// A newer reorder happened while the writes were in flight; the results
    /// of this cycle were discarded and the newer sequence will persist later.
    Superseded,
}
