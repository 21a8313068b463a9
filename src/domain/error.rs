//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent dump structure violations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("tree {tree}: {unplaced} node(s) left in an incomplete level")]
    IncompleteLevel { tree: usize, unplaced: usize },
}
