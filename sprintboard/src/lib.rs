//! Backlog, sprint and issue engine with pluggable document storage
//!
//! This crate implements the ordering and lifecycle rules of a small Scrum
//! tool: projects with members and invites, sprints that move through
//! `not_started → active → completed`, and issues ordered in a per-project
//! backlog and placed into sprints, status columns and assignees.
//!
//! ## Overview
//!
//! - **Commands are structs** - every operation is a struct whose fields are
//!   its parameters and which implements [`Execute`]
//! - **One batch per mutation** - commands validate first, then commit all
//!   their writes through one [`store::WriteBatch`]
//! - **Serialized writes** - mutations hold the context's write gate, so
//!   reorderings and sprint starts never interleave
//! - **Activity log** - [`SprintboardProcessor`] records every mutation with
//!   its actor
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use sprintboard::{
//!     issue::{AddIssue, PromoteIssue},
//!     project::AddProject,
//!     Execute, SprintboardContext,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = SprintboardContext::in_memory("alice");
//!
//! let project = AddProject::new("Apollo").execute(&ctx).await.into_result()?;
//! let project_id = project["id"].as_str().unwrap_or_default();
//!
//! let issue = AddIssue::new("Fix login", project_id)
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//! PromoteIssue::new(issue["id"].as_str().unwrap_or_default())
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! [`store::FileStore`] keeps one pretty-printed JSON document per entity:
//!
//! ```text
//! store/
//! ├── .lock                  # Exclusive lock held while a batch is applied
//! ├── sprintboard.toml       # Optional configuration
//! ├── projects/{id}.json
//! ├── members/{id}.json
//! ├── sprints/{id}.json
//! ├── issues/{id}.json
//! ├── notifications/{id}.json
//! ├── users/{id}.json
//! └── activity/
//!     └── current.jsonl      # Global operation log (one JSON entry per line)
//! ```

pub mod config;
mod context;
pub mod dispatch;
mod error;
pub mod identity;
pub mod parse;
mod processor;
pub mod schema;
pub mod sequencing;
pub mod store;
pub mod types;
mod validate;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Command modules
pub mod activity;
pub mod invite;
pub mod issue;
pub mod member;
pub mod project;
pub mod sprint;
pub mod user;

// Re-export Execute trait and types from operations crate
pub use sprintboard_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use config::{ResequencePolicy, SprintboardConfig};
pub use context::{SprintboardContext, Transaction};
pub use dispatch::dispatch;
pub use error::{ErrorKind, Result, SprintboardError};
pub use identity::{IdentityProvider, StaticIdentity};
pub use processor::SprintboardProcessor;
pub use store::{EntityStore, FileStore, MemoryStore};

// Re-export commonly used types
pub use types::{
    ActorId, InviteStatus, Issue, IssueId, IssueStatus, IssueType, Member, MemberId, MemberRole,
    Notification, NotificationId, Noun, Operation as ParsedOperation, OperationResult, Priority,
    Project, ProjectId, Sprint, SprintId, SprintStatus, User, Verb,
};
