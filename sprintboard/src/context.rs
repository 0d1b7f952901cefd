//! SprintboardContext - data access primitives for commands
//!
//! The context provides typed access to the entity store, the calling
//! actor and the configuration. No business logic lives here; commands do
//! all the work.

use crate::config::SprintboardConfig;
use crate::error::{Result, SprintboardError};
use crate::identity::{IdentityProvider, StaticIdentity};
use crate::store::{Entity, EntityStore, MemoryStore, StoreGuard, WriteBatch};
use crate::types::{
    ActorId, Issue, IssueId, Member, MemberId, Notification, NotificationId, Project, ProjectId,
    Sprint, SprintId, User,
};
use serde_json::Value;
use sprintboard_operations::LogEntry;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Guard for one mutation; releases the store lock, then the write gate
pub struct Transaction<'a> {
    _store: StoreGuard,
    _gate: MutexGuard<'a, ()>,
}

/// Context passed to every command
#[derive(Clone)]
pub struct SprintboardContext {
    store: Arc<dyn EntityStore>,
    identity: Arc<dyn IdentityProvider>,
    config: Arc<SprintboardConfig>,
    /// Serializes mutations issued through this context and its clones
    write_gate: Arc<Mutex<()>>,
}

impl SprintboardContext {
    pub fn new(store: Arc<dyn EntityStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store,
            identity,
            config: Arc::new(SprintboardConfig::default()),
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Context over a fresh in-memory store acting as `actor`
    pub fn in_memory(actor: impl Into<ActorId>) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(StaticIdentity::new(actor)),
        )
    }

    pub fn with_config(mut self, config: SprintboardConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Same store, configuration and write gate, different caller
    pub fn with_identity(&self, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            ..self.clone()
        }
    }

    /// Shorthand for [`with_identity`](Self::with_identity) with a fixed actor
    pub fn as_actor(&self, actor: impl Into<ActorId>) -> Self {
        self.with_identity(Arc::new(StaticIdentity::new(actor)))
    }

    pub fn config(&self) -> &SprintboardConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    /// Resolve the calling actor
    pub async fn current_actor(&self) -> Result<ActorId> {
        self.identity.resolve_actor().await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Enter the mutation critical section.
    ///
    /// Takes this context's write gate, then the store's exclusive lock,
    /// which also excludes other processes sharing the store. Commands hold
    /// the guard from their first read until `commit` returns, so
    /// read-validate-write sequences never interleave.
    pub async fn transaction(&self) -> Result<Transaction<'_>> {
        let gate = self.write_gate.lock().await;
        let store = self.store.begin().await?;
        Ok(Transaction {
            _store: store,
            _gate: gate,
        })
    }

    /// Commit staged writes in one store call
    pub async fn commit(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        debug!(writes = batch.len(), "committing batch");
        self.store.apply(batch).await
    }

    // =========================================================================
    // Typed reads
    // =========================================================================

    /// Fetch an entity by id, `None` when missing
    pub async fn fetch<E: Entity>(&self, id: &str) -> Result<Option<E>> {
        match self.store.get(E::COLLECTION, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// All entities of a type
    pub async fn fetch_all<E: Entity>(&self) -> Result<Vec<E>> {
        let docs = self.store.list(E::COLLECTION).await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(SprintboardError::from))
            .collect()
    }

    /// Entities whose `field` equals `value`
    pub async fn query_by<E: Entity>(&self, field: &str, value: &str) -> Result<Vec<E>> {
        let docs = self
            .store
            .query(E::COLLECTION, field, &Value::from(value))
            .await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(SprintboardError::from))
            .collect()
    }

    pub async fn read_project(&self, id: &ProjectId) -> Result<Project> {
        self.fetch(id.as_str())
            .await?
            .ok_or_else(|| SprintboardError::ProjectNotFound { id: id.to_string() })
    }

    pub async fn read_sprint(&self, id: &SprintId) -> Result<Sprint> {
        self.fetch(id.as_str())
            .await?
            .ok_or_else(|| SprintboardError::SprintNotFound { id: id.to_string() })
    }

    pub async fn read_issue(&self, id: &IssueId) -> Result<Issue> {
        self.fetch(id.as_str())
            .await?
            .ok_or_else(|| SprintboardError::IssueNotFound { id: id.to_string() })
    }

    pub async fn read_member(&self, id: &MemberId) -> Result<Member> {
        self.fetch(id.as_str())
            .await?
            .ok_or_else(|| SprintboardError::MemberNotFound { id: id.to_string() })
    }

    pub async fn read_notification(&self, id: &NotificationId) -> Result<Notification> {
        self.fetch(id.as_str())
            .await?
            .ok_or_else(|| SprintboardError::InviteNotFound { id: id.to_string() })
    }

    pub async fn read_user(&self, id: &ActorId) -> Result<User> {
        self.fetch(id.as_str())
            .await?
            .ok_or_else(|| SprintboardError::UserNotFound { id: id.to_string() })
    }

    // =========================================================================
    // Project-scoped lookups
    // =========================================================================

    /// Issues of a project in backlog order: `(sequence, id)` ascending
    pub async fn project_issues(&self, project_id: &ProjectId) -> Result<Vec<Issue>> {
        let mut issues: Vec<Issue> = self.query_by("project_id", project_id.as_str()).await?;
        sort_issues(&mut issues);
        Ok(issues)
    }

    /// Issues of a sprint, `(sequence, id)` ascending
    pub async fn sprint_issues(&self, sprint_id: &SprintId) -> Result<Vec<Issue>> {
        let mut issues: Vec<Issue> = self.query_by("sprint_id", sprint_id.as_str()).await?;
        sort_issues(&mut issues);
        Ok(issues)
    }

    /// Sprints of a project ordered by id; minted ids sort by creation time
    pub async fn project_sprints(&self, project_id: &ProjectId) -> Result<Vec<Sprint>> {
        let mut sprints: Vec<Sprint> = self.query_by("project_id", project_id.as_str()).await?;
        sprints.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(sprints)
    }

    pub async fn project_members(&self, project_id: &ProjectId) -> Result<Vec<Member>> {
        self.query_by("project_id", project_id.as_str()).await
    }

    /// Membership of `actor` in the project, if any
    pub async fn find_member(&self, project_id: &ProjectId, actor: &ActorId) -> Result<Option<Member>> {
        let members = self.project_members(project_id).await?;
        Ok(members.into_iter().find(|m| &m.actor_id == actor))
    }

    /// Require `actor` to be an admin of the project
    pub async fn require_admin(&self, project_id: &ProjectId, actor: &ActorId) -> Result<Member> {
        match self.find_member(project_id, actor).await? {
            Some(member) if member.role.is_admin() => Ok(member),
            _ => Err(SprintboardError::Forbidden {
                actor: actor.to_string(),
                project_id: project_id.to_string(),
                required: "an admin",
            }),
        }
    }

    /// Require `actor` to be a member (any role) of the project
    pub async fn require_member(&self, project_id: &ProjectId, actor: &ActorId) -> Result<Member> {
        self.find_member(project_id, actor)
            .await?
            .ok_or_else(|| SprintboardError::Forbidden {
                actor: actor.to_string(),
                project_id: project_id.to_string(),
                required: "a member",
            })
    }

    /// Resolve a user profile, `None` if the actor never registered one
    pub async fn resolve_user(&self, actor: Option<&ActorId>) -> Result<Option<User>> {
        match actor {
            Some(id) => self.fetch(id.as_str()).await,
            None => Ok(None),
        }
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    pub async fn append_activity(&self, entry: &LogEntry) -> Result<()> {
        self.store.append_activity(entry).await
    }

    /// Activity entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Result<Vec<LogEntry>> {
        self.store.read_activity(limit).await
    }
}

fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| (a.sequence, &a.id).cmp(&(b.sequence, &b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemberRole;

    async fn setup() -> SprintboardContext {
        SprintboardContext::in_memory("alice")
    }

    #[tokio::test]
    async fn test_typed_roundtrip_and_not_found() {
        let ctx = setup().await;
        let project = Project::new("Apollo", ActorId::from_string("alice"));

        let mut batch = WriteBatch::new();
        batch.put(&project).unwrap();
        ctx.commit(batch).await.unwrap();

        let loaded = ctx.read_project(&project.id).await.unwrap();
        assert_eq!(loaded, project);

        let missing = ctx.read_project(&ProjectId::from_string("nope")).await;
        assert!(matches!(
            missing,
            Err(SprintboardError::ProjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_project_issues_sorted_by_sequence_then_id() {
        let ctx = setup().await;
        let project_id = ProjectId::from_string("p1");

        let mut batch = WriteBatch::new();
        for (id, seq) in [("c", 1), ("b", 0), ("a", 1)] {
            let mut issue = Issue::new(project_id.clone(), id, seq);
            issue.id = IssueId::from_string(id);
            batch.put(&issue).unwrap();
        }
        ctx.commit(batch).await.unwrap();

        let ids: Vec<_> = ctx
            .project_issues(&project_id)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id.to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_require_admin() {
        let ctx = setup().await;
        let project_id = ProjectId::from_string("p1");
        let alice = ActorId::from_string("alice");
        let bob = ActorId::from_string("bob");

        let mut batch = WriteBatch::new();
        batch
            .put(&Member::new(project_id.clone(), alice.clone(), MemberRole::Admin))
            .unwrap();
        batch
            .put(&Member::new(project_id.clone(), bob.clone(), MemberRole::Member))
            .unwrap();
        ctx.commit(batch).await.unwrap();

        assert!(ctx.require_admin(&project_id, &alice).await.is_ok());
        assert!(ctx.require_member(&project_id, &bob).await.is_ok());
        let err = ctx.require_admin(&project_id, &bob).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_identity_switch_shares_store() {
        let ctx = setup().await;
        let bob_ctx = ctx.as_actor("bob");

        let mut batch = WriteBatch::new();
        batch
            .put(&User::new(ActorId::from_string("bob"), "Bob"))
            .unwrap();
        ctx.commit(batch).await.unwrap();

        assert_eq!(bob_ctx.current_actor().await.unwrap().as_str(), "bob");
        assert_eq!(
            bob_ctx
                .read_user(&ActorId::from_string("bob"))
                .await
                .unwrap()
                .name,
            "Bob"
        );
    }
}
