//! Forest rendering service
//!
//! Loads a dump through the filesystem abstraction and writes the
//! level-by-level view, a structural check, or a canonical dump.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, WriteResultExt};
use crate::domain::{
    layout_tree, parse_forest, DomainError, Forest, ForestDump, LevelLayout, LevelList, NodeList,
};
use crate::infrastructure::traits::FileSystem;

/// Number of trees rendered when no limit is configured.
pub const DEFAULT_TREE_LIMIT: usize = 60;

/// Knobs for a render run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Trees past this count are not rendered.
    pub tree_limit: usize,
    /// Fail on the first tree with unplaced nodes instead of warning.
    pub strict: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tree_limit: DEFAULT_TREE_LIMIT,
            strict: false,
        }
    }
}

/// Structural report for one tree. Tree numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeReport {
    pub tree: usize,
    pub levels: usize,
    pub placed: usize,
    pub unplaced: usize,
}

impl TreeReport {
    fn new(tree: usize, layout: &LevelLayout) -> Self {
        Self {
            tree,
            levels: layout.levels.len(),
            placed: layout.placed_count(),
            unplaced: layout.unplaced.len(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced == 0
    }
}

/// Outcome of a render run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub rendered: usize,
    pub skipped: usize,
    /// Trees rendered with unplaced nodes (lenient mode only).
    pub incomplete: Vec<TreeReport>,
}

/// Service turning tree dumps into level views.
pub struct RenderService {
    fs: Arc<dyn FileSystem>,
}

impl RenderService {
    /// Create a new render service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a dump file.
    #[instrument(skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Forest> {
        // Check file exists first - give clear error message
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read dump", path)?;
        let forest = parse_forest(&content);
        debug!("load: {} trees from {}", forest.len(), path.display());
        Ok(forest)
    }

    /// Write the level view of the first `tree_limit` trees.
    ///
    /// Each tree prints its root, one line per complete level, then a blank
    /// line. Nodes left in an unfinished level are not printed; in strict
    /// mode the first such tree aborts the run.
    pub fn render<W: Write>(
        &self,
        forest: &Forest,
        options: RenderOptions,
        out: &mut W,
    ) -> ApplicationResult<RenderSummary> {
        let mut summary = RenderSummary {
            skipped: forest.len().saturating_sub(options.tree_limit),
            ..Default::default()
        };
        if summary.skipped > 0 {
            debug!(
                "render: skipping {} trees past limit {}",
                summary.skipped, options.tree_limit
            );
        }

        for (idx, tree) in forest.trees().iter().take(options.tree_limit).enumerate() {
            let layout = layout_tree(tree);
            let report = TreeReport::new(idx + 1, &layout);
            if !report.is_complete() {
                if options.strict {
                    return Err(DomainError::IncompleteLevel {
                        tree: report.tree,
                        unplaced: report.unplaced,
                    }
                    .into());
                }
                warn!(
                    "tree {}: {} unplaced node(s) not rendered",
                    report.tree, report.unplaced
                );
                summary.incomplete.push(report);
            }
            write_layout(&layout, out).output_context()?;
            summary.rendered += 1;
        }
        Ok(summary)
    }

    /// Group every tree and report its structure, ignoring the tree limit.
    pub fn check(&self, forest: &Forest) -> Vec<TreeReport> {
        forest
            .trees()
            .iter()
            .enumerate()
            .map(|(idx, tree)| TreeReport::new(idx + 1, &layout_tree(tree)))
            .collect()
    }

    /// Write the forest back in canonical dump format.
    pub fn normalize<W: Write>(&self, forest: &Forest, out: &mut W) -> ApplicationResult<()> {
        write!(out, "{}", ForestDump(forest)).output_context()
    }
}

/// Print one grouped tree: root, levels, blank separator line.
pub fn write_layout<W: Write>(layout: &LevelLayout, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", NodeList(&layout.root))?;
    for level in &layout.levels {
        writeln!(out, "{}", LevelList(level))?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealFileSystem;

    fn render_str(input: &str, options: RenderOptions) -> (String, RenderSummary) {
        let service = RenderService::new(Arc::new(RealFileSystem));
        let mut out = Vec::new();
        let summary = service
            .render(&parse_forest(input), options, &mut out)
            .unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_render_two_level_tree() {
        let (out, summary) = render_str("*\n5\n-\n2\n3\n-\n7\n-\n", RenderOptions::default());
        assert_eq!(out, "['5']\n[[['2', '3'], ['7']]]\n\n");
        assert_eq!(summary.rendered, 1);
        assert!(summary.incomplete.is_empty());
    }

    #[test]
    fn test_render_lenient_reports_incomplete_tree() {
        let (out, summary) = render_str("*\n5\n-\n2\n-\n", RenderOptions::default());
        assert_eq!(out, "['5']\n\n");
        assert_eq!(summary.incomplete.len(), 1);
        assert_eq!(summary.incomplete[0].unplaced, 1);
    }
}
