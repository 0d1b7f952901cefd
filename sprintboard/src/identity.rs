//! Identity provider: resolves who is calling

use crate::error::{Result, SprintboardError};
use crate::types::ActorId;
use async_trait::async_trait;

/// Resolves the calling actor's stable identifier
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The current actor, or [`SprintboardError::Unauthenticated`]
    async fn resolve_actor(&self) -> Result<ActorId>;
}

/// Identity fixed at construction, e.g. from a CLI flag or a session
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    actor: Option<ActorId>,
}

impl StaticIdentity {
    pub fn new(actor: impl Into<ActorId>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    /// No actor; every resolution fails as unauthenticated
    pub fn anonymous() -> Self {
        Self { actor: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn resolve_actor(&self) -> Result<ActorId> {
        self.actor.clone().ok_or(SprintboardError::Unauthenticated)
    }
}
