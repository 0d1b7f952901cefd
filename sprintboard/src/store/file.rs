//! File-backed entity store
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/
//!   projects/<id>.json
//!   members/<id>.json
//!   sprints/<id>.json
//!   issues/<id>.json
//!   notifications/<id>.json
//!   users/<id>.json
//!   activity/current.jsonl
//!   .lock
//! ```

use super::{Collection, EntityStore, StoreGuard, Write, WriteBatch};
use crate::error::{Result, SprintboardError};
use async_trait::async_trait;
use fs2::FileExt;
use serde_json::Value;
use sprintboard_operations::LogEntry;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// One pretty-printed JSON file per document
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.as_str())
    }

    /// Path of a document; ids that could escape the collection dir are rejected
    pub fn document_path(&self, collection: Collection, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.collection_dir(collection).join(format!("{}.json", id)))
    }

    pub fn activity_path(&self) -> PathBuf {
        self.root.join("activity").join("current.jsonl")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    /// Create the collection and activity directories
    ///
    /// Idempotent. Writes create missing directories on their own; this is for
    /// callers that want the layout up front.
    pub async fn create_directories(&self) -> Result<()> {
        for collection in Collection::ALL {
            fs::create_dir_all(self.collection_dir(collection)).await?;
        }
        fs::create_dir_all(self.root.join("activity")).await?;
        Ok(())
    }

    /// Acquire the exclusive store lock, blocking until it is free
    pub fn lock(&self) -> Result<StoreLock> {
        let file = self.open_lock_file()?;
        file.lock_exclusive()?;
        Ok(StoreLock { file })
    }

    /// Try to acquire the exclusive store lock (non-blocking)
    pub fn try_lock(&self) -> Result<StoreLock> {
        let file = self.open_lock_file()?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(StoreLock { file }),
            Err(_) => Err(SprintboardError::LockBusy),
        }
    }

    fn open_lock_file(&self) -> Result<std::fs::File> {
        std::fs::create_dir_all(&self.root)?;
        Ok(std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?)
    }
}

/// RAII lock guard - releases on drop
pub struct StoreLock {
    file: std::fs::File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.starts_with('.') || id.contains(['/', '\\']) || id.contains("..") {
        return Err(SprintboardError::invalid_value(
            "id",
            format!("'{}' is not a valid document id", id),
        ));
    }
    Ok(())
}

#[async_trait]
impl EntityStore for FileStore {
    async fn begin(&self) -> Result<StoreGuard> {
        let store = FileStore::new(self.root.clone());
        let lock = tokio::task::spawn_blocking(move || store.lock())
            .await
            .map_err(|e| SprintboardError::Io(std::io::Error::other(e)))??;
        debug!(root = %self.root.display(), "store lock acquired");
        Ok(StoreGuard::holding(lock))
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let path = self.document_path(collection, id)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let dir = self.collection_dir(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut docs = Vec::with_capacity(paths.len());
        for path in paths {
            let content = fs::read_to_string(&path).await?;
            docs.push(serde_json::from_str(&content)?);
        }
        Ok(docs)
    }

    async fn apply(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        // Validate every path before touching disk
        let mut planned = Vec::with_capacity(batch.len());
        for write in batch.into_writes() {
            let path = self.document_path(write.collection(), write.id())?;
            planned.push((path, write));
        }

        debug!(writes = planned.len(), root = %self.root.display(), "applying batch to file store");

        for (path, write) in planned {
            match write {
                Write::Put { doc, .. } => {
                    let content = serde_json::to_string_pretty(&doc)?;
                    atomic_write(&path, content.as_bytes()).await?;
                }
                Write::Delete { .. } => {
                    if path.exists() {
                        fs::remove_file(&path).await?;
                    }
                }
            }
        }
        Ok(())
    }

    async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        let path = self.activity_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        let path = self.activity_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).await?;
        let mut entries: Vec<LogEntry> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable activity line");
                    None
                }
            })
            .collect();

        // Newest first
        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content).await?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join(".sprintboard"));
        (temp, store)
    }

    fn put(id: &str, doc: Value) -> WriteBatch {
        let mut batch = WriteBatch::new();
        batch.writes.push(Write::Put {
            collection: Collection::Sprints,
            id: id.into(),
            doc,
        });
        batch
    }

    #[tokio::test]
    async fn test_paths() {
        let (temp, store) = setup();
        let root = temp.path().join(".sprintboard");

        assert_eq!(store.root(), root);
        assert_eq!(
            store.document_path(Collection::Issues, "abc").unwrap(),
            root.join("issues").join("abc.json")
        );
        assert_eq!(store.activity_path(), root.join("activity").join("current.jsonl"));
    }

    #[tokio::test]
    async fn test_document_roundtrip_on_disk() {
        let (_temp, store) = setup();

        store
            .apply(put("s1", json!({"id": "s1", "name": "Sprint 1"})))
            .await
            .unwrap();

        let path = store.document_path(Collection::Sprints, "s1").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let doc = store.get(Collection::Sprints, "s1").await.unwrap().unwrap();
        assert_eq!(doc["name"], "Sprint 1");
        assert_eq!(store.list(Collection::Sprints).await.unwrap().len(), 1);
        assert!(store.list(Collection::Issues).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let (_temp, store) = setup();

        for bad in ["../escape", "a/b", "", ".hidden"] {
            let err = store.get(Collection::Issues, bad).await.unwrap_err();
            assert!(matches!(err, SprintboardError::InvalidValue { .. }), "{bad}");
        }

        let result = store.apply(put("../x", json!({}))).await;
        assert!(result.is_err());
        assert!(store.list(Collection::Sprints).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_locking() {
        let (_temp, store) = setup();

        let lock1 = store.try_lock().unwrap();
        let result = store.try_lock();
        assert!(matches!(result, Err(SprintboardError::LockBusy)));

        drop(lock1);
        let _lock2 = store.try_lock().unwrap();
    }

    #[tokio::test]
    async fn test_begin_waits_for_holder() {
        let (_temp, store) = setup();
        let other = FileStore::new(store.root().to_path_buf());

        let guard = store.begin().await.unwrap();
        assert!(matches!(other.try_lock(), Err(SprintboardError::LockBusy)));

        let waiter = tokio::spawn(async move { other.begin().await.map(|_| ()) });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_activity_log() {
        let (_temp, store) = setup();
        assert!(store.read_activity(None).await.unwrap().is_empty());

        for op in ["add sprint", "start sprint"] {
            let entry = LogEntry::new(op, Value::Null, Value::Null, Some("alice".into()), 1);
            store.append_activity(&entry).await.unwrap();
        }

        let entries = store.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].op, "start sprint");
        assert_eq!(entries[0].actor.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_create_directories_is_idempotent() {
        let (_temp, store) = setup();
        store.create_directories().await.unwrap();
        store.create_directories().await.unwrap();
        for collection in Collection::ALL {
            assert!(store.collection_dir(collection).is_dir());
        }
    }
}
