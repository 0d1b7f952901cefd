//! Backlog ordering rules.
//!
//! Pure functions over issue lists; commands load the issues, call into
//! here, and stage whatever changed.

use crate::config::ResequencePolicy;
use crate::error::{Result, SprintboardError};
use crate::types::{Issue, IssueId};
use std::collections::{HashMap, HashSet};

/// Sequence for a newly created issue: appended after the `existing` ones
pub fn next_sequence(existing: &[Issue]) -> u32 {
    u32::try_from(existing.len()).unwrap_or(u32::MAX)
}

/// Outcome of moving an issue to the top of its project's backlog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promotion {
    /// Target already sorts first; nothing to write
    AlreadyFirst,
    /// New contiguous assignment `0..N` for every issue, target first
    Reordered(Vec<(IssueId, u32)>),
}

/// Move `target` to position 0 of `ordered` (ids in current backlog order).
///
/// Returns `None` when `target` is not in the list. Every other issue keeps
/// its relative order and the result is exactly `0..N`.
pub fn promote(ordered: &[IssueId], target: &IssueId) -> Option<Promotion> {
    let position = ordered.iter().position(|id| id == target)?;
    if position == 0 {
        return Some(Promotion::AlreadyFirst);
    }

    let reordered = std::iter::once(target)
        .chain(ordered.iter().filter(|id| *id != target))
        .enumerate()
        .map(|(seq, id)| (id.clone(), seq as u32))
        .collect();
    Some(Promotion::Reordered(reordered))
}

/// Check a resequence submission for one project against the policy.
///
/// `project_issues` is the project's full issue set before the change;
/// `updates` maps the submitted issue ids to their new sequences. Under
/// `validate` a submitted issue may not share its new sequence with any
/// other issue. Duplicates among untouched issues are left alone so a
/// resequence can still repair them.
pub fn check_resequence(
    policy: ResequencePolicy,
    project_issues: &[Issue],
    updates: &HashMap<IssueId, u32>,
) -> Result<()> {
    if policy == ResequencePolicy::Trust {
        return Ok(());
    }

    let mut holders: HashMap<u32, usize> = HashMap::new();
    for issue in project_issues {
        let sequence = updates.get(&issue.id).copied().unwrap_or(issue.sequence);
        *holders.entry(sequence).or_default() += 1;
    }

    let mut touched: Vec<u32> = updates.values().copied().collect();
    touched.sort_unstable();
    match touched.into_iter().find(|sequence| holders.get(sequence).copied().unwrap_or(0) > 1) {
        Some(sequence) => Err(SprintboardError::DuplicateSequence { sequence }),
        None => Ok(()),
    }
}

/// Reject submissions naming the same issue twice (validate policy only)
pub fn check_unique_ids<'a>(
    policy: ResequencePolicy,
    ids: impl IntoIterator<Item = &'a IssueId>,
) -> Result<()> {
    if policy == ResequencePolicy::Trust {
        return Ok(());
    }

    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SprintboardError::invalid_value(
                "issues",
                format!("issue {} is listed more than once", id),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectId;
    use proptest::prelude::*;

    fn ids(names: &[&str]) -> Vec<IssueId> {
        names.iter().map(|n| IssueId::from_string(*n)).collect()
    }

    fn issue(id: &str, sequence: u32) -> Issue {
        let mut issue = Issue::new(ProjectId::from_string("p1"), id, sequence);
        issue.id = IssueId::from_string(id);
        issue
    }

    #[test]
    fn test_next_sequence_appends() {
        assert_eq!(next_sequence(&[]), 0);
        assert_eq!(next_sequence(&[issue("a", 0), issue("b", 1)]), 2);
    }

    #[test]
    fn test_promote_last_to_top() {
        let ordered = ids(&["i1", "i2", "i3"]);
        let result = promote(&ordered, &IssueId::from_string("i3")).unwrap();
        assert_eq!(
            result,
            Promotion::Reordered(vec![
                (IssueId::from_string("i3"), 0),
                (IssueId::from_string("i1"), 1),
                (IssueId::from_string("i2"), 2),
            ])
        );
    }

    #[test]
    fn test_promote_first_is_noop() {
        let ordered = ids(&["i1", "i2"]);
        assert_eq!(
            promote(&ordered, &IssueId::from_string("i1")),
            Some(Promotion::AlreadyFirst)
        );
    }

    #[test]
    fn test_promote_unknown_target() {
        assert_eq!(promote(&ids(&["i1"]), &IssueId::from_string("zz")), None);
    }

    #[test]
    fn test_validate_rejects_collision_with_untouched_issue() {
        let issues = [issue("a", 0), issue("b", 1), issue("c", 2)];
        let updates = HashMap::from([(IssueId::from_string("a"), 2)]);

        let err = check_resequence(ResequencePolicy::Validate, &issues, &updates).unwrap_err();
        assert!(matches!(err, SprintboardError::DuplicateSequence { sequence: 2 }));
        assert!(check_resequence(ResequencePolicy::Trust, &issues, &updates).is_ok());
    }

    #[test]
    fn test_validate_accepts_permutation() {
        let issues = [issue("a", 0), issue("b", 1), issue("c", 2)];
        let updates = HashMap::from([
            (IssueId::from_string("a"), 2),
            (IssueId::from_string("c"), 0),
        ]);
        assert!(check_resequence(ResequencePolicy::Validate, &issues, &updates).is_ok());
    }

    #[test]
    fn test_validate_ignores_untouched_duplicates() {
        // b and c already share 2; moving a elsewhere does not involve them
        let issues = [issue("a", 0), issue("b", 2), issue("c", 2)];
        let updates = HashMap::from([(IssueId::from_string("a"), 5)]);
        assert!(check_resequence(ResequencePolicy::Validate, &issues, &updates).is_ok());

        // Moving b onto c's sequence still collides
        let updates = HashMap::from([(IssueId::from_string("b"), 2)]);
        let err = check_resequence(ResequencePolicy::Validate, &issues, &updates).unwrap_err();
        assert!(matches!(err, SprintboardError::DuplicateSequence { sequence: 2 }));

        // Repairing the duplicate is accepted
        let updates = HashMap::from([(IssueId::from_string("c"), 1)]);
        assert!(check_resequence(ResequencePolicy::Validate, &issues, &updates).is_ok());
    }

    #[test]
    fn test_unique_ids() {
        let submitted = ids(&["a", "b", "a"]);
        assert!(check_unique_ids(ResequencePolicy::Validate, &submitted).is_err());
        assert!(check_unique_ids(ResequencePolicy::Trust, &submitted).is_ok());
    }

    proptest! {
        #[test]
        fn prop_promote_is_contiguous_and_stable(len in 1usize..40, pick in any::<prop::sample::Index>()) {
            let ordered: Vec<IssueId> = (0..len).map(|i| IssueId::from_string(format!("i{:02}", i))).collect();
            let target = ordered[pick.index(len)].clone();

            match promote(&ordered, &target).unwrap() {
                Promotion::AlreadyFirst => prop_assert_eq!(&ordered[0], &target),
                Promotion::Reordered(assignment) => {
                    let sequences: Vec<u32> = assignment.iter().map(|(_, s)| *s).collect();
                    prop_assert_eq!(sequences, (0..len as u32).collect::<Vec<_>>());
                    prop_assert_eq!(&assignment[0].0, &target);

                    let rest: Vec<&IssueId> = assignment[1..].iter().map(|(id, _)| id).collect();
                    let expected: Vec<&IssueId> = ordered.iter().filter(|id| **id != target).collect();
                    prop_assert_eq!(rest, expected);
                }
            }
        }
    }
}
