//! In-memory entity store for tests and ephemeral sessions

use super::{Collection, EntityStore, Write, WriteBatch};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use sprintboard_operations::LogEntry;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Inner {
    docs: HashMap<Collection, BTreeMap<String, Value>>,
    activity: Vec<LogEntry>,
}

/// Documents held in maps behind one `RwLock`.
///
/// `apply` holds the write lock for the whole batch, so readers never see a
/// half-applied batch.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let inner = self.inner.read().await;
        Ok(inner
            .docs
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let inner = self.inner.read().await;
        Ok(inner
            .docs
            .get(&collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn apply(&self, batch: WriteBatch) -> Result<()> {
        let mut inner = self.inner.write().await;
        debug!(writes = batch.len(), "applying batch to memory store");
        for write in batch.into_writes() {
            match write {
                Write::Put {
                    collection,
                    id,
                    doc,
                } => {
                    inner.docs.entry(collection).or_default().insert(id, doc);
                }
                Write::Delete { collection, id } => {
                    if let Some(docs) = inner.docs.get_mut(&collection) {
                        docs.remove(&id);
                    }
                }
            }
        }
        Ok(())
    }

    async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.inner.write().await.activity.push(entry.clone());
        Ok(())
    }

    async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let inner = self.inner.read().await;
        let newest_first = inner.activity.iter().rev().cloned();
        Ok(match limit {
            Some(limit) => newest_first.take(limit).collect(),
            None => newest_first.collect(),
        })
    }
}
