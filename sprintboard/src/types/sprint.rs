//! Sprint types and lifecycle state

use super::ids::{ProjectId, SprintId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sprint lifecycle: `not_started` → `active` → `completed`, with
/// `active → not_started` as the revert edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    #[default]
    NotStarted,
    Active,
    Completed,
}

impl SprintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Completed sprints accept no further lifecycle moves except an explicit revert
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time-boxed container of issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: SprintId,
    pub project_id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub status: SprintStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl Sprint {
    /// Create a not-started sprint without dates
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id: SprintId::new(),
            project_id,
            name: name.into(),
            status: SprintStatus::NotStarted,
            start_date: None,
            end_date: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SprintStatus::Active
    }

    /// Mark active with the given window
    pub fn start(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        self.status = SprintStatus::Active;
        self.start_date = Some(start);
        self.end_date = Some(end);
    }

    pub fn complete(&mut self) {
        self.status = SprintStatus::Completed;
    }

    /// Back to not-started; dates are cleared
    pub fn reset(&mut self) {
        self.status = SprintStatus::NotStarted;
        self.start_date = None;
        self.end_date = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_lifecycle_methods() {
        let mut sprint = Sprint::new(ProjectId::from_string("p1"), "Sprint 1");
        assert_eq!(sprint.status, SprintStatus::NotStarted);

        let start = Utc::now();
        sprint.start(start, start + Duration::days(14));
        assert!(sprint.is_active());
        assert_eq!(sprint.start_date, Some(start));

        sprint.reset();
        assert_eq!(sprint.status, SprintStatus::NotStarted);
        assert!(sprint.start_date.is_none());
        assert!(sprint.end_date.is_none());

        sprint.complete();
        assert!(sprint.status.is_terminal());
    }

    #[test]
    fn test_dates_omitted_when_absent() {
        let sprint = Sprint::new(ProjectId::from_string("p1"), "Sprint 1");
        let json = serde_json::to_value(&sprint).unwrap();
        assert_eq!(json["status"], "not_started");
        assert!(json.get("start_date").is_none());
    }
}
