//! Flat directory snapshots.

use crate::error::{DirwatchError, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// The set of entry names present in a directory at one instant.
///
/// Names are kept sorted so reports come out in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    names: BTreeSet<String>,
}

impl Snapshot {
    /// An empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the directory had no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `name` was present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Entry names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub(crate) fn names(&self) -> &BTreeSet<String> {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for Snapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// List the entry names currently in `dir`.
///
/// The listing is flat and unfiltered: hidden files and subdirectory names
/// are included, nothing below the top level is visited. Names that are not
/// valid UTF-8 are converted lossily.
///
/// Fails if the directory, or any entry while iterating it, cannot be read.
pub fn take_snapshot(dir: &Path) -> Result<Snapshot> {
    let entries = std::fs::read_dir(dir).map_err(|e| DirwatchError::io(dir, e))?;

    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| DirwatchError::io(dir, e))?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(Snapshot { names })
}
