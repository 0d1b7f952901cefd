//! Operation processor that writes the activity log

use crate::context::SprintboardContext;
use crate::error::{Result, SprintboardError};
use serde_json::Value;
use sprintboard_operations::{async_trait, Execute, LogEntry, OperationProcessor};
use tracing::{debug, info, warn};

/// Runs commands, attributes their log entries to an actor and appends
/// them to the store's activity log.
///
/// The actor is the one given at construction, or else whoever the context's
/// identity provider resolves. Read-only commands produce no entry.
#[derive(Debug, Clone, Default)]
pub struct SprintboardProcessor {
    actor: Option<String>,
}

impl SprintboardProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute every entry to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    async fn attribute(&self, ctx: &SprintboardContext, entry: LogEntry) -> LogEntry {
        if entry.actor.is_some() {
            return entry;
        }
        match &self.actor {
            Some(actor) => entry.with_actor(actor.clone()),
            None => match ctx.current_actor().await {
                Ok(actor) => entry.with_actor(actor.to_string()),
                Err(_) => entry,
            },
        }
    }
}

#[async_trait]
impl OperationProcessor<SprintboardContext, SprintboardError> for SprintboardProcessor {
    async fn process<T>(&self, operation: &T, ctx: &SprintboardContext) -> Result<Value>
    where
        T: Execute<SprintboardContext, SprintboardError> + Send + Sync,
    {
        let op = operation.op_string();
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(entry) = log_entry {
            let entry = self.attribute(ctx, entry).await;
            let affected = match &result {
                Ok(value) => operation.affected_resource_ids(value),
                Err(_) => Vec::new(),
            };
            // Audit failures never fail an already committed mutation
            if let Err(e) = self.write_log(ctx, &entry, &affected).await {
                warn!(op = %op, error = %e, "failed to append activity entry");
            }
        }

        match &result {
            Ok(_) => debug!(op = %op, "operation succeeded"),
            Err(e) => warn!(op = %op, kind = %e.kind(), error = %e, "operation failed"),
        }
        result
    }

    async fn write_log(
        &self,
        ctx: &SprintboardContext,
        log_entry: &LogEntry,
        affected_resources: &[String],
    ) -> Result<()> {
        ctx.append_activity(log_entry).await?;
        info!(
            op = %log_entry.op,
            actor = log_entry.actor.as_deref().unwrap_or("-"),
            affected = ?affected_resources,
            duration_ms = log_entry.duration_ms,
            "recorded activity"
        );
        Ok(())
    }
}
