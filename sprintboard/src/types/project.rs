//! Project and membership types

use super::ids::{ActorId, MemberId, ProjectId};
use serde::{Deserialize, Serialize};

/// A project groups members, sprints and issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// The creating actor
    pub owner_id: ActorId,
    /// Hidden from listings but not purged
    #[serde(default)]
    pub soft_deleted: bool,
}

impl Project {
    /// Shortest accepted project name (after trimming)
    pub const MIN_NAME_LEN: usize = 3;
    /// Longest accepted project name (after trimming)
    pub const MAX_NAME_LEN: usize = 64;

    pub fn new(name: impl Into<String>, owner_id: ActorId) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            owner_id,
            soft_deleted: false,
        }
    }
}

/// Role of a member within a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
}

impl MemberRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Member => f.write_str("member"),
        }
    }
}

/// Membership of an actor in a project. Unique per (project, actor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub project_id: ProjectId,
    pub actor_id: ActorId,
    pub role: MemberRole,
}

impl Member {
    pub fn new(project_id: ProjectId, actor_id: ActorId, role: MemberRole) -> Self {
        Self {
            id: MemberId::new(),
            project_id,
            actor_id,
            role,
        }
    }
}
