//! Sidebar entries and shape-based classification.
//!
//! An object that carries a `children` key is a group; every other shape is
//! a leaf. Classification happens once, while the model is built, and the
//! rest of the crate only sees [`SidebarEntry`].

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{EntryPosition, ModelError};
use crate::raw::{RawSidebarEntry, RawSidebarObject};

/// Direct link to one documentation page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafEntry {
    path: String,
    label: String,
}

impl LeafEntry {
    /// Page path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Display text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Named section with its own landing page and member pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupEntry {
    title: String,
    path: String,
    children: Vec<LeafEntry>,
}

impl GroupEntry {
    /// Section title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Landing page path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Member pages in display order.
    pub fn children(&self) -> &[LeafEntry] {
        &self.children
    }
}

/// Top-level sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarEntry {
    /// Single page.
    Leaf(LeafEntry),
    /// Section with children.
    Group(GroupEntry),
}

impl SidebarEntry {
    /// Path of the page this entry links to.
    pub fn path(&self) -> &str {
        match self {
            Self::Leaf(leaf) => leaf.path(),
            Self::Group(group) => group.path(),
        }
    }

    /// Display text (leaf label or group title).
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf(leaf) => leaf.label(),
            Self::Group(group) => group.title(),
        }
    }

    /// Classify a raw declaration found at `sidebar[index]`.
    pub(crate) fn classify(raw: RawSidebarEntry, index: usize) -> Result<Self, ModelError> {
        let position = EntryPosition::top(index);
        match raw {
            RawSidebarEntry::Object(RawSidebarObject {
                title,
                path,
                children: Some(children),
            }) => {
                let title = required(title, "title", position)?;
                let path = required(path, "path", position)?;
                let children = children
                    .into_iter()
                    .enumerate()
                    .map(|(child, raw)| classify_leaf(raw, EntryPosition::child(index, child)))
                    .collect::<Result<Vec<_>, _>>()?;

                let group = GroupEntry {
                    title,
                    path,
                    children,
                };
                check_distinct_paths(&group, index)?;
                Ok(Self::Group(group))
            }
            leaf => classify_leaf(leaf, position).map(Self::Leaf),
        }
    }
}

/// Borrowed view of a sidebar node, as yielded by traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarNode<'a> {
    /// Top-level leaf or group child.
    Leaf(&'a LeafEntry),
    /// Group header (visited before its children).
    Group(&'a GroupEntry),
}

impl<'a> SidebarNode<'a> {
    /// Path of the page this node links to.
    pub fn path(self) -> &'a str {
        match self {
            Self::Leaf(leaf) => leaf.path(),
            Self::Group(group) => group.path(),
        }
    }

    /// Display text (leaf label or group title).
    pub fn label(self) -> &'a str {
        match self {
            Self::Leaf(leaf) => leaf.label(),
            Self::Group(group) => group.title(),
        }
    }

    /// Returns true for group headers.
    pub const fn is_group(self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl<'a> From<&'a SidebarEntry> for SidebarNode<'a> {
    fn from(entry: &'a SidebarEntry) -> Self {
        match entry {
            SidebarEntry::Leaf(leaf) => Self::Leaf(leaf),
            SidebarEntry::Group(group) => Self::Group(group),
        }
    }
}

/// Classify a declaration that must be a leaf.
fn classify_leaf(raw: RawSidebarEntry, position: EntryPosition) -> Result<LeafEntry, ModelError> {
    match raw {
        RawSidebarEntry::Path(path) => {
            let path = required(Some(path), "path", position)?;
            Err(ModelError::malformed(
                position,
                format!("missing label for {path:?}"),
            ))
        }
        RawSidebarEntry::Pair(values) => {
            let Ok([path, label]) = <[String; 2]>::try_from(values) else {
                return Err(ModelError::malformed(
                    position,
                    "expected [path, label] shorthand",
                ));
            };
            Ok(LeafEntry {
                path: required(Some(path), "path", position)?,
                label: required(Some(label), "label", position)?,
            })
        }
        RawSidebarEntry::Object(RawSidebarObject {
            children: Some(_), ..
        }) => Err(ModelError::malformed(
            position,
            "nested groups are not supported",
        )),
        RawSidebarEntry::Object(RawSidebarObject { title, path, .. }) => Ok(LeafEntry {
            path: required(path, "path", position)?,
            label: required(title, "title", position)?,
        }),
        RawSidebarEntry::Other(value) => Err(ModelError::malformed(position, mismatch(&value))),
    }
}

/// Describe why a declaration matched none of the known shapes.
fn mismatch(value: &Value) -> String {
    let Value::Object(fields) = value else {
        return match value {
            Value::Array(_) => "expected [path, label] shorthand of strings".to_owned(),
            other => format!("expected [path, label] or an object, found {}", kind(other)),
        };
    };

    let problem = ["title", "path"]
        .into_iter()
        .find_map(|field| {
            fields
                .get(field)
                .filter(|v| !v.is_string() && !v.is_null())
                .map(|v| format!("`{field}` must be a string, found {}", kind(v)))
        })
        .or_else(|| {
            fields
                .get("children")
                .filter(|v| !v.is_array() && !v.is_null())
                .map(|v| format!("`children` must be a list, found {}", kind(v)))
        })
        .unwrap_or_else(|| "unrecognized entry".to_owned());

    match fields.get("title").and_then(Value::as_str) {
        Some(title) => format!("{problem} (in {title:?})"),
        None => problem,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Require a field to be present and non-empty.
fn required(
    value: Option<String>,
    field: &str,
    position: EntryPosition,
) -> Result<String, ModelError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ModelError::malformed(position, format!("missing `{field}`"))),
    }
}

/// The group's landing page and every child must be distinct paths.
fn check_distinct_paths(group: &GroupEntry, index: usize) -> Result<(), ModelError> {
    let mut seen = HashSet::with_capacity(group.children.len() + 1);
    seen.insert(group.path.as_str());

    for child in &group.children {
        if !seen.insert(child.path.as_str()) {
            return Err(ModelError::DuplicateChildPath {
                index,
                group: group.title.clone(),
                path: child.path.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn leaf(path: &str, label: &str) -> LeafEntry {
    LeafEntry {
        path: path.to_owned(),
        label: label.to_owned(),
    }
}
