//! Added/removed computation between two snapshots.

use super::snapshot::Snapshot;

/// Names that appeared and disappeared between two snapshots.
///
/// Both lists are sorted and disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// `current - previous`
    pub added: Vec<String>,
    /// `previous - current`
    pub removed: Vec<String>,
}

impl SnapshotDiff {
    /// Compare `previous` against `current`.
    #[must_use]
    pub fn between(previous: &Snapshot, current: &Snapshot) -> Self {
        Self {
            added: current
                .names()
                .difference(previous.names())
                .cloned()
                .collect(),
            removed: previous
                .names()
                .difference(current.names())
                .cloned()
                .collect(),
        }
    }

    /// Whether nothing was added or removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Whether any names were added. Only additions trigger a notification.
    #[must_use]
    pub fn has_additions(&self) -> bool {
        !self.added.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(names: &[&str]) -> Snapshot {
        names.iter().copied().collect()
    }

    #[test]
    fn test_diff_identical_is_empty() {
        let a = snap(&["a", "b"]);
        let diff = SnapshotDiff::between(&a, &a.clone());
        assert!(diff.is_empty());
        assert!(!diff.has_additions());
    }

    #[test]
    fn test_diff_added_and_removed() {
        let diff = SnapshotDiff::between(&snap(&["a", "b"]), &snap(&["b", "c"]));
        assert_eq!(diff.added, vec!["c"]);
        assert_eq!(diff.removed, vec!["a"]);
    }

    #[test]
    fn test_diff_from_empty() {
        let diff = SnapshotDiff::between(&Snapshot::new(), &snap(&["x"]));
        assert_eq!(diff.added, vec!["x"]);
        assert!(diff.removed.is_empty());
        assert!(diff.has_additions());
    }

    #[test]
    fn test_diff_removal_only_has_no_additions() {
        let diff = SnapshotDiff::between(&snap(&["x", "y"]), &snap(&["y"]));
        assert!(!diff.is_empty());
        assert!(!diff.has_additions());
        assert_eq!(diff.removed, vec!["x"]);
    }

    #[test]
    fn test_diff_output_is_sorted() {
        let diff = SnapshotDiff::between(&Snapshot::new(), &snap(&["zeta", "alpha", "mid"]));
        assert_eq!(diff.added, vec!["alpha", "mid", "zeta"]);
    }
}
