//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod render;

pub use render::{
    write_layout, RenderOptions, RenderService, RenderSummary, TreeReport, DEFAULT_TREE_LIMIT,
};
