//! Tests for RenderService

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use forestview::application::services::{RenderOptions, RenderService};
use forestview::application::ApplicationError;
use forestview::domain::{parse_forest, DomainError};
use forestview::config::Settings;
use forestview::infrastructure::di::ServiceContainer;
use forestview::infrastructure::traits::{FileSystem, RealFileSystem};
use forestview::util::testing;

/// In-memory filesystem keyed by path.
#[derive(Default)]
struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    fn with_file(path: &str, content: &str) -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from(path), content.to_string());
        Self { files }
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

fn render_to_string(input: &str, options: RenderOptions) -> String {
    let service = RenderService::new(Arc::new(MemoryFileSystem::default()));
    let mut out = Vec::new();
    service
        .render(&parse_forest(input), options, &mut out)
        .unwrap();
    String::from_utf8(out).unwrap()
}

/// `count` root-only trees with keys 1..=count.
fn root_only_forest(count: usize) -> String {
    (1..=count).map(|k| format!("*\n{}\n-\n", k)).collect()
}

const THREE_LEVELS: &str = "*\n10\n-\n4\n-\n20\n30\n-\n1\n2\n-\n5\n-\n15\n-\n25\n-\n35\n-\n";

// ============================================================
// Loading
// ============================================================

#[test]
fn given_dump_file_when_loading_then_parses_all_trees() {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tree.txt");
    std::fs::write(&path, root_only_forest(3)).unwrap();

    let service = RenderService::new(Arc::new(RealFileSystem));
    let forest = service.load(&path).unwrap();

    assert_eq!(forest.len(), 3);
}

#[test]
fn given_missing_file_when_loading_then_returns_input_not_found() {
    let service = RenderService::new(Arc::new(MemoryFileSystem::default()));

    let result = service.load(Path::new("tree.txt"));

    match result {
        Err(ApplicationError::InputNotFound(path)) => assert_eq!(path, PathBuf::from("tree.txt")),
        other => panic!("expected InputNotFound, got {:?}", other.map(|f| f.len())),
    }
}

#[test]
fn given_memory_file_when_loading_then_reads_through_filesystem_trait() {
    let fs = MemoryFileSystem::with_file("dump.txt", THREE_LEVELS);
    let service = RenderService::new(Arc::new(fs));

    let forest = service.load(Path::new("dump.txt")).unwrap();

    assert_eq!(forest.len(), 1);
    assert_eq!(forest.trees()[0].node_count(), 8);
}

#[test]
fn given_container_with_memory_fs_when_loading_configured_input_then_uses_settings() {
    let settings = Settings {
        input: PathBuf::from("dump.txt"),
        tree_limit: 1,
        strict: true,
    };
    let fs = MemoryFileSystem::with_file("dump.txt", &root_only_forest(2));
    let container = ServiceContainer::with_deps(settings, Arc::new(fs));
    let mut out = Vec::new();

    let forest = container
        .render_service
        .load(&container.settings.input)
        .unwrap();
    let summary = container
        .render_service
        .render(&forest, container.render_options(), &mut out)
        .unwrap();

    assert_eq!(summary.rendered, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(String::from_utf8(out).unwrap(), "['1']\n\n");
}

// ============================================================
// Rendering
// ============================================================

#[test]
fn given_root_only_tree_when_rendering_then_prints_root_and_blank_line() {
    let out = render_to_string("*\nA\n-\n", RenderOptions::default());

    assert_eq!(out, "['A']\n\n");
}

#[test]
fn given_well_formed_tree_when_rendering_then_prints_each_level_once() {
    let out = render_to_string(THREE_LEVELS, RenderOptions::default());

    assert_eq!(
        out,
        "['10']\n\
         [[['4'], ['20', '30']]]\n\
         [[['1', '2'], ['5']], [['15'], ['25'], ['35']]]\n\
         \n"
    );
}

#[test]
fn given_unterminated_dump_when_rendering_then_groups_like_terminated_one() {
    let terminated = render_to_string("hdr\na\n-\nb\n-\nc\n-\n", RenderOptions::default());
    let unterminated = render_to_string("hdr\na\n-\nb\n-\nc\n", RenderOptions::default());

    assert_eq!(terminated, "['a']\n[[['b'], ['c']]]\n\n");
    assert_eq!(unterminated, terminated);
}

#[test]
fn given_terminator_tail_when_rendering_then_tail_is_not_grouped() {
    let (tree, summary) = {
        let service = RenderService::new(Arc::new(MemoryFileSystem::default()));
        let mut out = Vec::new();
        let summary = service
            .render(&parse_forest("h\n5\n-\nb\n-\n"), RenderOptions::default(), &mut out)
            .unwrap();
        (String::from_utf8(out).unwrap(), summary)
    };

    // the empty segment after the last `-` never lands in a group
    assert_eq!(tree, "['5']\n\n");
    assert_eq!(summary.incomplete[0].unplaced, 1);
}

#[test]
fn given_carriage_return_line_endings_when_rendering_then_splits_like_newlines() {
    let out = render_to_string("h\ra\r-\rb\r-\rc\r-\r", RenderOptions::default());

    assert_eq!(out, "['a']\n[[['b'], ['c']]]\n\n");
}

#[test]
fn given_empty_tree_when_rendering_then_prints_empty_root() {
    let out = render_to_string("*\n", RenderOptions::default());

    assert_eq!(out, "[]\n\n");
}

#[rstest]
#[case(59, 59, 0)]
#[case(60, 60, 0)]
#[case(61, 60, 1)]
fn given_forest_when_rendering_then_caps_at_sixty_trees(
    #[case] trees: usize,
    #[case] rendered: usize,
    #[case] skipped: usize,
) {
    let service = RenderService::new(Arc::new(MemoryFileSystem::default()));
    let forest = parse_forest(&root_only_forest(trees));
    let mut out = Vec::new();

    let summary = service
        .render(&forest, RenderOptions::default(), &mut out)
        .unwrap();

    assert_eq!(summary.rendered, rendered);
    assert_eq!(summary.skipped, skipped);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("\n\n").count(), rendered);
    assert!(!text.contains(&format!("['{}']", rendered + 1)));
}

#[test]
fn given_custom_limit_when_rendering_then_honors_it() {
    let options = RenderOptions {
        tree_limit: 2,
        ..Default::default()
    };

    let out = render_to_string(&root_only_forest(5), options);

    assert_eq!(out, "['1']\n\n['2']\n\n");
}

// ============================================================
// Malformed counts
// ============================================================

#[test]
fn given_short_level_when_rendering_lenient_then_prints_complete_levels_only() {
    // root declares 2 children, level 2 is missing one node
    let input = "*\n5\n-\n2\n-\n7\n-\n1\n-\n";
    let service = RenderService::new(Arc::new(MemoryFileSystem::default()));
    let mut out = Vec::new();

    let summary = service
        .render(&parse_forest(input), RenderOptions::default(), &mut out)
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "['5']\n[[['2'], ['7']]]\n\n"
    );
    assert_eq!(summary.incomplete.len(), 1);
    assert_eq!(summary.incomplete[0].tree, 1);
    assert_eq!(summary.incomplete[0].unplaced, 1);
}

#[test]
fn given_short_level_when_rendering_strict_then_fails_with_tree_index() {
    let input = "*\n5\n-\n2\n-\n7\n-\n*\n5\n-\n2\n-\n";
    let service = RenderService::new(Arc::new(MemoryFileSystem::default()));
    let mut out = Vec::new();
    let options = RenderOptions {
        strict: true,
        ..Default::default()
    };

    let result = service.render(&parse_forest(input), options, &mut out);

    match result {
        Err(ApplicationError::Domain(e)) => assert_eq!(
            e,
            DomainError::IncompleteLevel {
                tree: 2,
                unplaced: 1
            }
        ),
        other => panic!("expected domain error, got {:?}", other.map(|s| s.rendered)),
    }
    // first tree was complete and already written
    assert_eq!(String::from_utf8(out).unwrap(), "['5']\n[[['2'], ['7']]]\n\n");
}

// ============================================================
// Check and normalize
// ============================================================

#[test]
fn given_mixed_forest_when_checking_then_reports_every_tree() {
    let input = format!("{}*\n5\n-\n2\n-\n", THREE_LEVELS);
    let service = RenderService::new(Arc::new(MemoryFileSystem::default()));

    let reports = service.check(&parse_forest(&input));

    assert_eq!(reports.len(), 2);
    assert!(reports[0].is_complete());
    assert_eq!(reports[0].levels, 2);
    assert_eq!(reports[0].placed, 8);
    assert!(!reports[1].is_complete());
    assert_eq!(reports[1].unplaced, 1);
}

#[test]
fn given_unterminated_dump_when_normalizing_then_writes_canonical_form() {
    let service = RenderService::new(Arc::new(MemoryFileSystem::default()));
    let mut out = Vec::new();

    service
        .normalize(&parse_forest("header\n 5 \n-\n2\n"), &mut out)
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "*\n5\n-\n2\n-\n");
}
