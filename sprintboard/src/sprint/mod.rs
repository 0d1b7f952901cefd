//! Sprint commands
//!
//! Lifecycle: `add` creates a not-started sprint, `start` activates it (at
//! most one active sprint per project), `complete` closes it and relocates
//! its open issues, `revert` sends it back to not-started.

mod add;
mod complete;
mod delete;
mod get;
mod list;
mod prune;
mod revert;
mod start;

pub use add::AddSprint;
pub use complete::{CompleteSprint, Disposition};
pub use delete::DeleteSprint;
pub use get::GetSprint;
pub use list::ListSprints;
pub use prune::PruneSprints;
pub use revert::RevertSprint;
pub use start::StartSprint;
