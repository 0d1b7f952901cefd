//! Entity store: the document database every command reads and writes through.
//!
//! Documents are JSON values grouped in [`Collection`]s and addressed by id.
//! Commands never write piecemeal; they stage puts and deletes into a
//! [`WriteBatch`] and hand it to [`EntityStore::apply`] once.

mod file;
mod memory;

pub use file::FileStore;
pub use file::StoreLock;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::types::{Issue, Member, Notification, Project, Sprint, User};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sprintboard_operations::LogEntry;

/// A named group of documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Projects,
    Members,
    Sprints,
    Issues,
    Notifications,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Self::Projects,
        Self::Members,
        Self::Sprints,
        Self::Issues,
        Self::Notifications,
        Self::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Members => "members",
            Self::Sprints => "sprints",
            Self::Issues => "issues",
            Self::Notifications => "notifications",
            Self::Users => "users",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed document stored in a fixed collection
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    /// Document key
    fn key(&self) -> &str;
}

macro_rules! impl_entity {
    ($ty:ty, $collection:expr) => {
        impl Entity for $ty {
            const COLLECTION: Collection = $collection;

            fn key(&self) -> &str {
                self.id.as_str()
            }
        }
    };
}

impl_entity!(Project, Collection::Projects);
impl_entity!(Member, Collection::Members);
impl_entity!(Sprint, Collection::Sprints);
impl_entity!(Issue, Collection::Issues);
impl_entity!(Notification, Collection::Notifications);
impl_entity!(User, Collection::Users);

/// One staged change
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Put {
        collection: Collection,
        id: String,
        doc: Value,
    },
    Delete {
        collection: Collection,
        id: String,
    },
}

impl Write {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Put { collection, .. } | Self::Delete { collection, .. } => *collection,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Put { id, .. } | Self::Delete { id, .. } => id,
        }
    }
}

/// Writes that commit together
#[derive(Debug, Default, Clone)]
pub struct WriteBatch {
    writes: Vec<Write>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an insert or full replacement of an entity
    pub fn put<E: Entity>(&mut self, entity: &E) -> Result<&mut Self> {
        let doc = serde_json::to_value(entity)?;
        self.writes.push(Write::Put {
            collection: E::COLLECTION,
            id: entity.key().to_string(),
            doc,
        });
        Ok(self)
    }

    /// Stage a delete
    pub fn delete(&mut self, collection: Collection, id: impl AsRef<str>) -> &mut Self {
        self.writes.push(Write::Delete {
            collection,
            id: id.as_ref().to_string(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<Write> {
        self.writes
    }
}

/// Store-level lock held for the length of a transaction.
///
/// Dropping it releases the lock. Stores without cross-process state hand
/// out an empty guard.
#[derive(Default)]
pub struct StoreGuard {
    _held: Option<Box<dyn Send + Sync>>,
}

impl StoreGuard {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn holding<T: Send + Sync + 'static>(lock: T) -> Self {
        Self {
            _held: Some(Box::new(lock)),
        }
    }
}

/// Storage collaborator for all entities and the activity log
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Acquire exclusive write access, waiting for other holders.
    ///
    /// Every writer sharing the store's backing data (other processes
    /// included) is excluded until the guard drops.
    async fn begin(&self) -> Result<StoreGuard> {
        Ok(StoreGuard::none())
    }

    /// Fetch one document by id
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>>;

    /// All documents of a collection, in id order
    async fn list(&self, collection: Collection) -> Result<Vec<Value>>;

    /// Documents whose top-level `field` equals `value`
    async fn query(&self, collection: Collection, field: &str, value: &Value) -> Result<Vec<Value>> {
        let docs = self.list(collection).await?;
        Ok(docs
            .into_iter()
            .filter(|doc| doc.get(field) == Some(value))
            .collect())
    }

    /// Commit a batch of puts and deletes. Callers hold a [`begin`](Self::begin) guard.
    async fn apply(&self, batch: WriteBatch) -> Result<()>;

    /// Append an entry to the activity log
    async fn append_activity(&self, entry: &LogEntry) -> Result<()>;

    /// Read activity entries, newest first
    async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>>;
}
