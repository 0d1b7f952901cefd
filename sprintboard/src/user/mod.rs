//! User profile commands

mod add;
mod get;

pub use add::AddUser;
pub use get::GetUser;
