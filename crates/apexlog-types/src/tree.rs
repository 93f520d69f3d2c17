//! Read-only navigation over a finished call tree.
//!
//! Children of a node are ordered by timestamp, so lookups by time use
//! binary search instead of scanning.

use crate::{LogEvent, Nanos};

impl LogEvent {
    pub fn children(&self) -> &[LogEvent] {
        &self.children
    }

    /// Whether `timestamp` falls within `[timestamp, end_stamp]`.
    pub fn contains_time(&self, timestamp: Nanos) -> bool {
        self.timestamp <= timestamp && timestamp <= self.end_stamp()
    }

    /// Direct child covering `timestamp`, if any.
    pub fn child_at(&self, timestamp: Nanos) -> Option<&LogEvent> {
        // last child starting at or before the timestamp
        let idx = self
            .children
            .partition_point(|c| c.timestamp <= timestamp)
            .checked_sub(1)?;
        let child = &self.children[idx];
        child.contains_time(timestamp).then_some(child)
    }

    /// Chain of nodes from this node's child down to the deepest
    /// descendant covering `timestamp`.
    pub fn path_at(&self, timestamp: Nanos) -> Vec<&LogEvent> {
        let mut path = Vec::new();
        let mut current = self;
        while let Some(child) = current.child_at(timestamp) {
            path.push(child);
            current = child;
        }
        path
    }

    /// Pre-order, depth-first iterator over this node and all descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// All descendants (including this node) matching `predicate`, in
    /// pre-order.
    pub fn find_all<'a>(&'a self, predicate: impl Fn(&LogEvent) -> bool) -> Vec<&'a LogEvent> {
        self.walk().filter(|e| predicate(e)).collect()
    }
}

/// Iterator returned by [`LogEvent::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a LogEvent>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a LogEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
