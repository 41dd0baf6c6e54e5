use crate::core::cache::CollectionCache;
use crate::core::reorder::{assign_contiguous, order_diff, reorder, sort_for_display};
use crate::domain::model::{Item, OrderWrite, PersistOutcome, ReorderRequest, WriteResult};
use crate::domain::ports::ConfigStore;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::validate_item_payload;
use futures::future::join_all;
use tokio::sync::Mutex;

/// Mutable editor state, all behind one lock so a persist cycle can release it
/// while its writes are in flight and notice when a newer edit superseded it.
struct EditorState {
    /// What the user currently sees, including not-yet-confirmed moves.
    optimistic: Vec<Item>,
    /// The last sequence the server is known to hold.
    confirmed: Vec<Item>,
    /// Bumped by every local edit; a persist cycle snapshots it and discards
    /// its results if the value moved while the writes were out.
    generation: u64,
    /// Set when a persist failed and the optimistic sequence is ahead of the
    /// server. Cleared by the next successful persist or refresh.
    unconfirmed: bool,
}

/// Client-side editing session for one ordered collection.
///
/// Holds the optimistic and server-confirmed sequences, turns drag events into
/// array moves, and persists reorders as a minimal batch of concurrent
/// per-item `order` writes. Failures never roll the optimistic sequence back;
/// the next successful refetch is the sole reconciliation point.
pub struct OrderedCollectionEditor<S: ConfigStore> {
    store: S,
    cache: CollectionCache,
    collection: String,
    required_fields: Vec<String>,
    state: Mutex<EditorState>,
}

/// Pure reconciliation of a finished write batch: either every write landed
/// and `desired` becomes the new confirmed sequence, or the cycle stays
/// unconfirmed and carries the ids that failed.
pub fn reconcile(desired: &[Item], results: &[WriteResult]) -> std::result::Result<Vec<Item>, Vec<i64>> {
    let failed: Vec<i64> = results.iter().filter(|r| !r.ok).map(|r| r.id).collect();
    if failed.is_empty() {
        Ok(desired.to_vec())
    } else {
        Err(failed)
    }
}

impl<S: ConfigStore> OrderedCollectionEditor<S> {
    pub fn new(store: S, cache: CollectionCache, collection: impl Into<String>) -> Self {
        Self {
            store,
            cache,
            collection: collection.into(),
            required_fields: Vec::new(),
            state: Mutex::new(EditorState {
                optimistic: Vec::new(),
                confirmed: Vec::new(),
                generation: 0,
                unconfirmed: false,
            }),
        }
    }

    pub fn with_required_fields(mut self, fields: Vec<String>) -> Self {
        self.required_fields = fields;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Read-through load: cache hit short-circuits the store. Resets both
    /// sequences to the fetched state sorted for display.
    pub async fn refresh(&self) -> Result<Vec<Item>> {
        let items = match self.cache.get(&self.collection).await {
            Some(cached) => {
                tracing::debug!("cache hit for '{}' ({} items)", self.collection, cached.len());
                cached
            }
            None => {
                let mut fetched = self.store.fetch(&self.collection).await?;
                sort_for_display(&mut fetched);
                self.cache.set(&self.collection, fetched.clone()).await;
                fetched
            }
        };

        let mut state = self.state.lock().await;
        state.optimistic = items.clone();
        state.confirmed = items.clone();
        state.generation += 1;
        state.unconfirmed = false;
        Ok(items)
    }

    /// The sequence currently shown to the user.
    pub async fn displayed(&self) -> Vec<Item> {
        self.state.lock().await.optimistic.clone()
    }

    pub async fn is_unconfirmed(&self) -> bool {
        self.state.lock().await.unconfirmed
    }

    /// Applies a drag event to the optimistic sequence. Pure and synchronous
    /// apart from the state lock, so the UI gets its feedback before any
    /// network round-trip. Returns whether the sequence actually changed.
    pub async fn apply(&self, request: ReorderRequest) -> bool {
        let mut state = self.state.lock().await;
        let moved = reorder(&state.optimistic, request.item_id, request.target_index);
        if moved == state.optimistic {
            return false;
        }
        state.optimistic = moved;
        state.generation += 1;
        true
    }

    /// Persists the optimistic order: assigns contiguous 0-based orders,
    /// diffs against the confirmed sequence and issues one concurrent partial
    /// write per changed item. All-or-nothing reporting; on success the cache
    /// entry is invalidated and refetched to pick up out-of-band edits.
    pub async fn persist(&self) -> Result<PersistOutcome> {
        let (snapshot, desired, writes) = {
            let mut state = self.state.lock().await;
            let mut desired = state.optimistic.clone();
            assign_contiguous(&mut desired);
            let writes = order_diff(&desired, &state.confirmed);
            state.optimistic = desired.clone();
            (state.generation, desired, writes)
        };

        if writes.is_empty() {
            tracing::debug!("persist for '{}': nothing moved, no writes", self.collection);
            return Ok(PersistOutcome::Clean { writes: 0 });
        }

        tracing::debug!(
            "persisting {} order updates for '{}'",
            writes.len(),
            self.collection
        );
        let results = self.issue_writes(&writes).await;

        let mut state = self.state.lock().await;
        if state.generation != snapshot {
            tracing::debug!(
                "persist for '{}' superseded by a newer edit, discarding results",
                self.collection
            );
            return Ok(PersistOutcome::Superseded);
        }

        match reconcile(&desired, &results) {
            Ok(confirmed) => {
                state.confirmed = confirmed;
                state.unconfirmed = false;
                drop(state);
                self.refetch_after_write(snapshot).await;
                Ok(PersistOutcome::Clean {
                    writes: writes.len(),
                })
            }
            Err(failed) => {
                // No rollback: the user's visual intent stays on screen, the
                // cycle is just marked unconfirmed until a refetch reconciles.
                state.unconfirmed = true;
                drop(state);
                // The writes that did land mutated the server, so the cached
                // entry is stale; the next refresh must go back to the store.
                self.cache.invalidate(&self.collection).await;
                tracing::warn!(
                    "persist for '{}' failed for items {:?}; remote order may be non-contiguous",
                    self.collection,
                    failed
                );
                Err(AdminError::WriteFailure {
                    collection: self.collection.clone(),
                    failed,
                })
            }
        }
    }

    async fn issue_writes(&self, writes: &[OrderWrite]) -> Vec<WriteResult> {
        let calls = writes.iter().map(|write| async move {
            let patch = serde_json::json!({ "order": write.order });
            let outcome = self
                .store
                .update(&self.collection, write.id, patch)
                .await;
            if let Err(ref err) = outcome {
                tracing::error!(
                    "order write for item {} in '{}' failed: {err}",
                    write.id,
                    self.collection
                );
            }
            WriteResult {
                id: write.id,
                ok: outcome.is_ok(),
            }
        });
        join_all(calls).await
    }

    /// Post-success reconciliation fetch. A failure here is only logged: the
    /// writes themselves landed and the next load will retry the fetch.
    async fn refetch_after_write(&self, snapshot: u64) {
        self.cache.invalidate(&self.collection).await;
        match self.store.fetch(&self.collection).await {
            Ok(mut fresh) => {
                sort_for_display(&mut fresh);
                let mut state = self.state.lock().await;
                if state.generation != snapshot {
                    return;
                }
                self.cache.set(&self.collection, fresh.clone()).await;
                state.optimistic = fresh.clone();
                state.confirmed = fresh;
            }
            Err(err) => {
                tracing::warn!(
                    "refetch of '{}' after successful write failed: {err}",
                    self.collection
                );
            }
        }
    }

    /// Creates an item at the end of the display order.
    pub async fn create(&self, fields: serde_json::Value) -> Result<Item> {
        validate_item_payload(&self.collection, &fields, &self.required_fields)?;

        // Orders can be sparse after lazy deletes, so appending means one
        // past the highest order, not the sequence length.
        let next_order = {
            let state = self.state.lock().await;
            state
                .optimistic
                .iter()
                .map(|item| item.order)
                .max()
                .map_or(0, |highest| highest + 1)
        };
        let mut payload = fields;
        if payload.get("order").is_none() {
            payload["order"] = serde_json::json!(next_order);
        }

        let created = self.store.create(&self.collection, payload).await?;
        tracing::info!("created item {} in '{}'", created.id, self.collection);
        self.cache.invalidate(&self.collection).await;

        let mut state = self.state.lock().await;
        state.optimistic.push(created.clone());
        state.confirmed.push(created.clone());
        state.generation += 1;
        Ok(created)
    }

    /// Updates an item's domain fields in place (not a reorder path).
    pub async fn update(&self, id: i64, fields: serde_json::Value) -> Result<Item> {
        validate_item_payload(&self.collection, &fields, &self.required_fields)?;

        let updated = self.store.update(&self.collection, id, fields).await?;
        self.cache.invalidate(&self.collection).await;

        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        for sequence in [&mut state.optimistic, &mut state.confirmed] {
            if let Some(slot) = sequence.iter_mut().find(|item| item.id == id) {
                *slot = updated.clone();
            }
        }
        state.generation += 1;
        Ok(updated)
    }

    /// Deletes an item. Survivors keep their order values; the gap is closed
    /// by the next persisted reorder rather than an extra write burst now.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(&self.collection, id).await?;
        tracing::info!("deleted item {id} from '{}'", self.collection);
        self.cache.invalidate(&self.collection).await;

        let mut state = self.state.lock().await;
        state.optimistic.retain(|item| item.id != id);
        state.confirmed.retain(|item| item.id != id);
        state.generation += 1;
        Ok(())
    }
}
