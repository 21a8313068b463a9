//! Domain layer: entities and tree-dump logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod dump;
pub mod entities;
pub mod error;
pub mod levels;
pub mod notation;
pub mod parser;

pub use dump::{ForestDump, TreeDump};
pub use entities::{Forest, Node, Tree};
pub use error::DomainError;
pub use levels::{layout_tree, Level, LevelLayout, LevelQueue};
pub use notation::{GroupList, LevelList, NodeList};
pub use parser::{parse_forest, split_nodes, split_trees};
