//! forestview: level-order viewer for B+ tree forest dumps.
//!
//! A dump holds one or more trees separated by `*` lines; every node is a
//! run of key lines terminated by `-`, listed breadth-first. The library
//! parses a dump into a [`domain::Forest`] and regroups each tree's nodes
//! into levels using the node widths (key count plus one).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{layout_tree, parse_forest, Forest, LevelLayout, Node, Tree};
