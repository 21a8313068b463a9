//! Canonical dump writer.
//!
//! Produces the format a B+ tree emits when it prints itself: a `*` line
//! opening each tree, then every node's key lines followed by `-`.

use std::fmt::{self, Display};

use crate::domain::entities::{Forest, Tree};
use crate::domain::parser::{NODE_SEPARATOR, TREE_SEPARATOR};

/// Display adapter writing one tree in dump format.
pub struct TreeDump<'a>(pub &'a Tree);

impl Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TREE_SEPARATOR)?;
        let nodes = std::iter::once(self.0.root()).chain(self.0.descendants());
        for node in nodes {
            for line in &node.lines {
                writeln!(f, "{}", line)?;
            }
            writeln!(f, "{}", NODE_SEPARATOR)?;
        }
        Ok(())
    }
}

/// Display adapter writing a whole forest in dump format.
///
/// The first tree's `*` line doubles as the header line the parser skips.
pub struct ForestDump<'a>(pub &'a Forest);

impl Display for ForestDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tree in self.0.trees() {
            write!(f, "{}", TreeDump(tree))?;
        }
        Ok(())
    }
}
