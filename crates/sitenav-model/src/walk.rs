//! Depth-first traversal over the sidebar.

use std::iter::FusedIterator;
use std::slice;

use crate::sidebar::{LeafEntry, SidebarEntry, SidebarNode};

/// Lazy, order-preserving depth-first walk over sidebar entries.
///
/// Yields `(depth, node)` pairs: top-level entries at depth 0, group
/// children at depth 1. A group is yielded before its children. Cloning the
/// iterator forks the walk at its current position.
#[derive(Clone, Debug)]
pub struct Walk<'a> {
    entries: slice::Iter<'a, SidebarEntry>,
    children: slice::Iter<'a, LeafEntry>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(entries: &'a [SidebarEntry]) -> Self {
        Self {
            entries: entries.iter(),
            children: Default::default(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, SidebarNode<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(child) = self.children.next() {
            return Some((1, SidebarNode::Leaf(child)));
        }

        let entry = self.entries.next()?;
        if let SidebarEntry::Group(group) = entry {
            self.children = group.children().iter();
        }
        Some((0, SidebarNode::from(entry)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower = self.children.len() + self.entries.len();
        let upper = self.entries.as_slice().iter().try_fold(
            self.children.len(),
            |acc, entry| match entry {
                SidebarEntry::Leaf(_) => acc.checked_add(1),
                SidebarEntry::Group(group) => acc.checked_add(1 + group.children().len()),
            },
        );
        (lower, upper)
    }
}

impl FusedIterator for Walk<'_> {}
