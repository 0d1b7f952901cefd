//! Error types for the sprintboard engine

use crate::types::SprintStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for sprintboard operations
pub type Result<T> = std::result::Result<T, SprintboardError>;

/// Coarse classification of a failure, stable across error variants.
///
/// Callers branch on this instead of matching every variant; it is also what
/// the boundary reports next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The calling actor could not be resolved
    Unauthenticated,
    /// The actor is known but lacks the required role
    Forbidden,
    /// A referenced project, sprint, issue, member, invite or user is missing
    NotFound,
    /// The operation would break a data invariant
    InvariantViolation,
    /// The input is malformed
    Validation,
    /// The entity store failed
    Store,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::InvariantViolation => "invariant_violation",
            Self::Validation => "validation",
            Self::Store => "store",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in sprintboard operations
#[derive(Debug, Error)]
pub enum SprintboardError {
    /// Identity resolution failed
    #[error("unauthenticated: no actor identity available")]
    Unauthenticated,

    /// Actor lacks the required project role
    #[error("actor '{actor}' is not {required} of project {project_id}")]
    Forbidden {
        actor: String,
        project_id: String,
        required: &'static str,
    },

    /// Project not found
    #[error("project not found: {id}")]
    ProjectNotFound { id: String },

    /// Sprint not found
    #[error("sprint not found: {id}")]
    SprintNotFound { id: String },

    /// Issue not found
    #[error("issue not found: {id}")]
    IssueNotFound { id: String },

    /// Member not found
    #[error("member not found: {id}")]
    MemberNotFound { id: String },

    /// Invite not found
    #[error("invite not found: {id}")]
    InviteNotFound { id: String },

    /// User not found
    #[error("user not found: {id}")]
    UserNotFound { id: String },

    /// Another sprint of the project is already active
    #[error("project {project_id} already has an active sprint: {active_id}")]
    SprintAlreadyActive {
        project_id: String,
        active_id: String,
    },

    /// Sprint lifecycle transition not allowed from the current status
    #[error("cannot {action} sprint {id} while it is {from}")]
    InvalidTransition {
        id: String,
        from: SprintStatus,
        action: &'static str,
    },

    /// Actor is already a member of the project
    #[error("actor '{actor}' is already a member of project {project_id}")]
    DuplicateMember { project_id: String, actor: String },

    /// A pending invite already exists for this recipient
    #[error("a pending invite for '{recipient}' to project {project_id} already exists")]
    DuplicateInvite {
        project_id: String,
        recipient: String,
    },

    /// Invite was already accepted or declined
    #[error("invite {id} was already {status}")]
    InviteAnswered { id: String, status: String },

    /// Removing or demoting the member would leave the project without an admin
    #[error("project {project_id} must keep at least one admin")]
    LastAdmin { project_id: String },

    /// Two issues would share a backlog position
    #[error("sequence {sequence} is assigned to more than one issue")]
    DuplicateSequence { sequence: u32 },

    /// Referenced entity belongs to a different project
    #[error("{resource} {id} does not belong to project {project_id}")]
    CrossProject {
        resource: &'static str,
        id: String,
        project_id: String,
    },

    /// Invalid operation
    #[error("invalid operation: {verb} {noun}")]
    InvalidOperation { verb: String, noun: String },

    /// Parse error
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Missing required field
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Store lock is held by another process
    #[error("lock busy - another operation in progress")]
    LockBusy,

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SprintboardError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::ProjectNotFound { .. }
            | Self::SprintNotFound { .. }
            | Self::IssueNotFound { .. }
            | Self::MemberNotFound { .. }
            | Self::InviteNotFound { .. }
            | Self::UserNotFound { .. } => ErrorKind::NotFound,
            Self::SprintAlreadyActive { .. }
            | Self::InvalidTransition { .. }
            | Self::DuplicateMember { .. }
            | Self::DuplicateInvite { .. }
            | Self::InviteAnswered { .. }
            | Self::LastAdmin { .. }
            | Self::DuplicateSequence { .. } => ErrorKind::InvariantViolation,
            Self::CrossProject { .. }
            | Self::InvalidOperation { .. }
            | Self::Parse { .. }
            | Self::MissingField { .. }
            | Self::InvalidValue { .. } => ErrorKind::Validation,
            Self::LockBusy | Self::Config(_) | Self::Io(_) | Self::Json(_) => ErrorKind::Store,
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockBusy)
    }
}

impl From<figment::Error> for SprintboardError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}
