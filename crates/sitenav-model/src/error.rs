//! Construction errors for the navigation model.

use std::fmt;

/// Location of a sidebar entry inside the declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryPosition {
    /// Index of the top-level sidebar entry.
    pub index: usize,
    /// Index inside the group's `children`, if the entry is a child.
    pub child: Option<usize>,
}

impl EntryPosition {
    pub(crate) const fn top(index: usize) -> Self {
        Self { index, child: None }
    }

    pub(crate) const fn child(index: usize, child: usize) -> Self {
        Self {
            index,
            child: Some(child),
        }
    }
}

impl fmt::Display for EntryPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.child {
            Some(child) => write!(f, "sidebar[{}].children[{child}]", self.index),
            None => write!(f, "sidebar[{}]", self.index),
        }
    }
}

/// Error returned when a site configuration fails validation.
///
/// Construction stops at the first error; no partially built model is
/// ever returned.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Sidebar entry is missing or mistypes a field its shape requires.
    #[error("Malformed entry at {position}: {reason}")]
    MalformedEntry {
        /// Where the entry was declared.
        position: EntryPosition,
        /// What is missing or wrong.
        reason: String,
    },
    /// Navigation link has an empty or missing target.
    #[error("Empty target for nav[{index}] ({label:?})")]
    EmptyTarget {
        /// Index in the `nav` sequence.
        index: usize,
        /// Display text of the link.
        label: String,
    },
    /// Navigation link target is neither a site path nor an absolute URL.
    #[error("Invalid target for nav[{index}]: {target:?} is neither a site path nor a URL")]
    InvalidTarget {
        /// Index in the `nav` sequence.
        index: usize,
        /// Offending target.
        target: String,
    },
    /// Two entries of one group point at the same path.
    #[error("Duplicate path {path:?} in group {group:?} (sidebar[{index}])")]
    DuplicateChildPath {
        /// Index of the group in the sidebar.
        index: usize,
        /// Group title.
        group: String,
        /// Repeated path.
        path: String,
    },
    /// `logo` is present but empty.
    #[error("Logo path cannot be empty")]
    EmptyLogo,
    /// Structured value does not have the configuration shape.
    #[error("Invalid configuration structure: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ModelError {
    pub(crate) fn malformed(position: EntryPosition, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            position,
            reason: reason.into(),
        }
    }
}
