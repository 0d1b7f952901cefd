//! Member commands

mod add;
mod delete;
mod list;
mod update;

pub use add::AddMember;
pub use delete::DeleteMember;
pub use list::ListMembers;
pub use update::UpdateMember;

use crate::error::{Result, SprintboardError};
use crate::types::{Member, MemberId, ProjectId};

/// Fail if removing or demoting `target` leaves the project without an admin
pub(crate) fn ensure_admin_remains(
    project_id: &ProjectId,
    members: &[Member],
    target: &MemberId,
) -> Result<()> {
    let remaining = members
        .iter()
        .filter(|m| m.role.is_admin() && &m.id != target)
        .count();
    if remaining == 0 {
        return Err(SprintboardError::LastAdmin {
            project_id: project_id.to_string(),
        });
    }
    Ok(())
}
