//! Dump parsing: lines → trees → nodes.
//!
//! The dump format is line based. The first line is a header and is ignored,
//! `*` starts a new tree and `-` terminates a node. Every line is stripped
//! before it is compared against a separator.

use tracing::{debug, trace};

use crate::domain::entities::{Forest, Node, Tree};

/// Separator line between trees.
pub const TREE_SEPARATOR: &str = "*";

/// Separator line between nodes.
pub const NODE_SEPARATOR: &str = "-";

/// Split `lines` into segments at every line equal to `separator`.
///
/// The segment after the last separator is always kept, even when empty,
/// so `n` separators always yield `n + 1` segments.
pub fn split_on<S: AsRef<str>>(lines: &[S], separator: &str) -> Vec<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for line in lines {
        let line = line.as_ref();
        if line == separator {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push(line.to_string());
        }
    }
    segments.push(current);
    segments
}

/// Split on `\n`, `\r\n` or a lone `\r`.
pub fn universal_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                let line = &rest[..idx];
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
                Some(line)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}

/// Strip every line and drop the header line.
pub fn content_lines(content: &str) -> Vec<String> {
    universal_lines(content)
        .skip(1)
        .map(|line| line.trim().to_string())
        .collect()
}

/// Split header-less lines into the raw line lists of each tree.
pub fn split_trees<S: AsRef<str>>(lines: &[S]) -> Vec<Vec<String>> {
    split_on(lines, TREE_SEPARATOR)
}

/// Split one tree's lines into nodes.
pub fn split_nodes<S: AsRef<str>>(lines: &[S]) -> Vec<Node> {
    split_on(lines, NODE_SEPARATOR)
        .into_iter()
        .map(Node::new)
        .collect()
}

/// Parse a whole dump into a forest.
pub fn parse_forest(content: &str) -> Forest {
    let lines = content_lines(content);
    let trees: Vec<Tree> = split_trees(&lines)
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let nodes = split_nodes(raw);
            trace!("tree {}: {} lines, {} segments", idx, raw.len(), nodes.len());
            Tree::new(nodes)
        })
        .collect();
    debug!("parsed {} trees from {} lines", trees.len(), lines.len());
    Forest::new(trees)
}
