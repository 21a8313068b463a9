//! Breadth-first level grouping.
//!
//! A dump lists nodes in breadth-first order but carries no explicit
//! structure. Each node's width says how many children it has, so the
//! nodes of one level can be cut into sibling groups by counting down the
//! widths of the level above.
//!
//! Two count queues drive the grouping: `current` holds the remaining child
//! counts of the parents whose children are being consumed, `next` collects
//! the widths of those children. When `current` drains, the collected
//! groups form one complete level and `next` becomes `current`.

use std::collections::VecDeque;
use std::mem;

use tracing::trace;

use crate::domain::entities::{Node, Tree};

/// One depth slice of a tree: sibling groups in parent order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    pub groups: Vec<Vec<Node>>,
}

impl Level {
    pub fn node_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

/// Result of grouping one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    pub root: Node,
    pub levels: Vec<Level>,
    /// Nodes consumed after the last complete level.
    ///
    /// Empty for a tree whose widths match its node count.
    pub unplaced: Vec<Node>,
}

impl LevelLayout {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Root plus every node placed in a complete level.
    pub fn placed_count(&self) -> usize {
        1 + self.levels.iter().map(Level::node_count).sum::<usize>()
    }
}

/// Queue-pair state machine cutting a node stream into levels.
#[derive(Debug)]
pub struct LevelQueue {
    current: VecDeque<usize>,
    next: VecDeque<usize>,
    closed: Vec<Vec<Node>>,
    open: Vec<Node>,
}

impl LevelQueue {
    /// Seed the queue with the root's width.
    pub fn new(root: &Node) -> Self {
        Self {
            current: VecDeque::from([root.width()]),
            next: VecDeque::new(),
            closed: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Feed the next node in dump order.
    ///
    /// Returns the finished level when this node completes one.
    pub fn push(&mut self, node: Node) -> Option<Level> {
        let remaining = self.current.front_mut().map(|count| {
            *count = count.saturating_sub(1);
            *count
        });
        self.next.push_back(node.width());
        self.open.push(node);

        // `current` is non-empty on entry: the node closing a level pushes
        // its width into `next` before the swap.
        if remaining.unwrap_or(0) == 0 {
            self.current.pop_front();
            self.closed.push(mem::take(&mut self.open));
        }

        if self.current.is_empty() {
            mem::swap(&mut self.current, &mut self.next);
            let level = Level {
                groups: mem::take(&mut self.closed),
            };
            trace!(
                "level closed: {} groups, {} nodes, next widths {:?}",
                level.groups.len(),
                level.node_count(),
                self.current
            );
            return Some(level);
        }
        None
    }

    /// Consume the queue, returning nodes that never reached a complete level.
    pub fn finish(self) -> Vec<Node> {
        self.closed.into_iter().flatten().chain(self.open).collect()
    }
}

/// Group a tree's descendants into levels.
pub fn layout_tree(tree: &Tree) -> LevelLayout {
    let root = tree.root().clone();
    let mut queue = LevelQueue::new(&root);
    let mut levels = Vec::new();
    for node in tree.descendants() {
        if let Some(level) = queue.push(node.clone()) {
            levels.push(level);
        }
    }
    LevelLayout {
        root,
        levels,
        unplaced: queue.finish(),
    }
}
