//! Project commands

mod add;
mod archive;
mod delete;
mod get;
mod list;
mod update;

pub use add::AddProject;
pub use archive::ArchiveProject;
pub use delete::DeleteProject;
pub use get::GetProject;
pub use list::ListProjects;
pub use update::UpdateProject;
