//! Domain entities: core data structures

/// One node of a dumped tree: the key lines between two `-` separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub lines: Vec<String>,
}

impl Node {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Number of children this node declares at the next level.
    ///
    /// A node holding `k` keys has `k + 1` children, so the width is the
    /// line count plus one. Leaves declare a width as well; the grouping
    /// simply runs out of nodes before it is used.
    pub fn width(&self) -> usize {
        self.lines.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Node {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// One tree of the forest, nodes in breadth-first dump order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Build a tree from its nodes.
    ///
    /// An empty node list is replaced by a single empty root so that every
    /// tree has a root.
    pub fn new(nodes: Vec<Node>) -> Self {
        if nodes.is_empty() {
            Self {
                nodes: vec![Node::default()],
            }
        } else {
            Self { nodes }
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Nodes below the root, without the terminator tail.
    ///
    /// A dump terminates every node with `-`, which leaves an empty segment
    /// after the last separator. That segment is not a node of the tree.
    pub fn descendants(&self) -> &[Node] {
        let rest = &self.nodes[1..];
        match rest.split_last() {
            Some((last, init)) if last.is_empty() => init,
            _ => rest,
        }
    }

    /// Number of real nodes: root plus descendants.
    pub fn node_count(&self) -> usize {
        1 + self.descendants().len()
    }
}

/// All trees parsed from one dump file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new(trees: Vec<Tree>) -> Self {
        Self { trees }
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
