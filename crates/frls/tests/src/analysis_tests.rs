use super::*;
use crate::syntax::{ParseError, SyntaxTree};

const PROJECT: &str = "module Project\n  class Error < StandardError\n\n  end\nend";
const OTHER: &str = "class Error\nend\n";

/// Delegates to Prism unless the text contains the marker.
struct MarkerFailingGrammar(&'static str);

impl Grammar for MarkerFailingGrammar {
    fn parse(
        &self,
        text: &str,
    ) -> Result<SyntaxTree, ParseError> {
        if text.contains(self.0) {
            return Err(ParseError::MissingRoot);
        }
        PrismGrammar.parse(text)
    }
}

fn file(path: &str) -> FileId {
    FileId::new(path)
}

fn cardinalities(analysis: &Analysis) -> (usize, usize) {
    (analysis.index().len(), analysis.index().location_count())
}

#[test]
fn sync_or_create_stores_content() {
    let mut analysis = Analysis::new();
    analysis.sync_or_create(file("/a.rb"), PROJECT.to_string());

    let source = analysis.source(&file("/a.rb")).unwrap();
    assert_eq!(source.content(), PROJECT);
    assert!(source.tree().is_some());
    assert_eq!(analysis.index().get("Project").len(), 1);
}

#[test]
fn open_tracks_and_indexes_ruby_files() {
    let mut analysis = Analysis::new();
    assert!(analysis.open(file("/a.rb"), "ruby", PROJECT.to_string()));

    let source = analysis.source(&file("/a.rb")).unwrap();
    assert_eq!(source.status(), OpenStatus::Opened);
    assert_eq!(analysis.index().len(), 3);
}

#[test]
fn open_rejects_other_languages_and_extensions() {
    let mut analysis = Analysis::new();
    assert!(!analysis.open(file("/a.rb"), "python", PROJECT.to_string()));
    assert!(!analysis.open(file("/a.py"), "ruby", PROJECT.to_string()));
    assert!(!analysis.open(file("/Rakefile"), "ruby", PROJECT.to_string()));

    assert!(analysis.registry().is_empty());
    assert!(analysis.index().is_empty());
}

#[test]
fn ruby_extension_check_is_exact() {
    assert!(has_ruby_extension(Path::new("/repo/lib/a.rb")));
    assert!(has_ruby_extension(Path::new("relative/b.rb")));
    assert!(!has_ruby_extension(Path::new("/repo/lib/a.RB")));
    assert!(!has_ruby_extension(Path::new("/repo/lib/a.rb.orig")));
    assert!(!has_ruby_extension(Path::new("/repo/lib/a.rbi")));
    assert!(!has_ruby_extension(Path::new("/repo/Rakefile")));
    assert!(!has_ruby_extension(Path::new("/repo/.rb")));
}

#[test]
fn repeated_open_changes_nothing() {
    let mut analysis = Analysis::new();
    analysis.open(file("/a.rb"), "ruby", PROJECT.to_string());
    let before = cardinalities(&analysis);

    assert!(!analysis.open(file("/a.rb"), "ruby", "class Other; end".to_string()));

    assert_eq!(cardinalities(&analysis), before);
    assert_eq!(analysis.source(&file("/a.rb")).unwrap().content(), PROJECT);
}

#[test]
fn reindexing_unchanged_file_never_duplicates() {
    let mut analysis = Analysis::new();
    analysis.open(file("/a.rb"), "ruby", PROJECT.to_string());
    let before = cardinalities(&analysis);

    for _ in 0..3 {
        analysis.change(file("/a.rb"), PROJECT.to_string());
    }
    analysis.close(&file("/a.rb"));
    analysis.open(file("/a.rb"), "ruby", PROJECT.to_string());

    assert_eq!(cardinalities(&analysis), before);
}

#[test]
fn change_requires_an_opened_source() {
    let mut analysis = Analysis::new();
    assert!(!analysis.change(file("/a.rb"), PROJECT.to_string()));
    assert!(analysis.registry().is_empty());

    analysis.discover(file("/a.rb"), OTHER.to_string());
    assert!(!analysis.change(file("/a.rb"), PROJECT.to_string()));
    assert_eq!(analysis.source(&file("/a.rb")).unwrap().content(), OTHER);
    assert!(analysis.index().get("Project").is_empty());
}

#[test]
fn apply_changes_runs_in_order_and_stops_at_rejection() {
    let mut analysis = Analysis::new();
    analysis.open(file("/a.rb"), "ruby", String::new());

    let applied = analysis.apply_changes(&file("/a.rb"), vec!["First".to_string(), "Second".to_string()]);
    assert_eq!(applied, 2);
    assert_eq!(analysis.source(&file("/a.rb")).unwrap().content(), "Second");
    assert_eq!(analysis.index().get("First").len(), 1);
    assert_eq!(analysis.index().get("Second").len(), 1);

    analysis.close(&file("/a.rb"));
    assert_eq!(analysis.apply_changes(&file("/a.rb"), vec!["Third".to_string()]), 0);
    assert!(analysis.index().get("Third").is_empty());
}

#[test]
fn close_toggles_status_only() {
    let mut analysis = Analysis::new();
    analysis.open(file("/a.rb"), "ruby", PROJECT.to_string());
    let before = cardinalities(&analysis);

    assert!(analysis.close(&file("/a.rb")));
    assert_eq!(analysis.source(&file("/a.rb")).unwrap().status(), OpenStatus::Closed);
    assert_eq!(cardinalities(&analysis), before);

    assert!(!analysis.close(&file("/a.rb")));
    assert!(!analysis.close(&file("/missing.rb")));
}

#[test]
fn discover_never_opens() {
    let mut analysis = Analysis::new();
    assert!(analysis.discover(file("/a.rb"), PROJECT.to_string()));
    assert_eq!(analysis.source(&file("/a.rb")).unwrap().status(), OpenStatus::Closed);
    assert_eq!(analysis.index().get("Error").len(), 1);

    analysis.open(file("/b.rb"), "ruby", OTHER.to_string());
    assert!(!analysis.discover(file("/b.rb"), PROJECT.to_string()));
    let opened = analysis.source(&file("/b.rb")).unwrap();
    assert_eq!(opened.status(), OpenStatus::Opened);
    assert_eq!(opened.content(), OTHER);

    assert!(!analysis.discover(file("/c.txt"), PROJECT.to_string()));
    assert!(analysis.source(&file("/c.txt")).is_none());
}

#[test]
fn open_of_discovered_source_replaces_content_and_opens() {
    let mut analysis = Analysis::new();
    analysis.discover(file("/a.rb"), OTHER.to_string());
    assert!(analysis.open(file("/a.rb"), "ruby", PROJECT.to_string()));

    let source = analysis.source(&file("/a.rb")).unwrap();
    assert_eq!(source.status(), OpenStatus::Opened);
    assert_eq!(source.content(), PROJECT);
    assert_eq!(analysis.index().get("Project").len(), 1);
}

#[test]
fn same_class_in_two_files_shares_one_entry() {
    let mut analysis = Analysis::new();
    analysis.discover(file("/a.rb"), PROJECT.to_string());
    analysis.discover(file("/b.rb"), OTHER.to_string());

    let locations = analysis.index().get("Error");
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].file, file("/a.rb"));
    assert_eq!(locations[1].file, file("/b.rb"));
}

#[test]
fn resolves_definition_across_files() {
    let mut analysis = Analysis::new();
    analysis.discover(file("/b.rb"), OTHER.to_string());
    analysis.open(file("/a.rb"), "ruby", PROJECT.to_string());

    let locations = analysis.resolve_definition(&file("/a.rb"), Position::new(1, 8));
    assert_eq!(
        locations,
        vec![
            Location::new(file("/b.rb"), Position::new(0, 6), Position::new(0, 11)),
            Location::new(file("/a.rb"), Position::new(1, 8), Position::new(1, 13)),
        ]
    );
    assert!(analysis.resolve_definition(&file("/missing.rb"), Position::new(0, 0)).is_empty());
}

#[test]
fn retain_policy_keeps_removed_constants() {
    let mut analysis = Analysis::new();
    analysis.open(file("/a.rb"), "ruby", "class Gone; end".to_string());
    analysis.change(file("/a.rb"), "class Kept; end".to_string());

    assert_eq!(analysis.index().get("Gone").len(), 1);
    assert_eq!(analysis.index().get("Kept").len(), 1);
}

#[test]
fn purge_policy_drops_removed_constants() {
    let mut analysis = Analysis::new();
    analysis.set_stale_locations(StaleLocationPolicy::Purge);
    analysis.discover(file("/b.rb"), "class Gone; end".to_string());
    analysis.open(file("/a.rb"), "ruby", "class Gone; end".to_string());
    analysis.change(file("/a.rb"), "class Kept; end".to_string());

    let gone = analysis.index().get("Gone");
    assert_eq!(gone.len(), 1);
    assert_eq!(gone[0].file, file("/b.rb"));
    assert_eq!(analysis.index().get("Kept").len(), 1);
}

#[test]
fn parse_failure_keeps_prior_entries() {
    let mut analysis = Analysis::with_grammar(Box::new(MarkerFailingGrammar("BROKEN")));
    analysis.set_stale_locations(StaleLocationPolicy::Purge);
    analysis.open(file("/a.rb"), "ruby", PROJECT.to_string());
    let before = cardinalities(&analysis);

    assert!(analysis.change(file("/a.rb"), "BROKEN".to_string()));

    let source = analysis.source(&file("/a.rb")).unwrap();
    assert_eq!(source.content(), "BROKEN");
    assert!(source.tree().is_none());
    assert_eq!(cardinalities(&analysis), before);
    assert!(analysis.resolve_definition(&file("/a.rb"), Position::new(0, 1)).is_empty());
}

#[test]
fn syntax_errors_still_index() {
    let mut analysis = Analysis::new();
    analysis.open(file("/a.rb"), "ruby", "class Broken\n  def x(\n".to_string());

    assert!(analysis.source(&file("/a.rb")).unwrap().tree().is_some());
    assert_eq!(analysis.index().get("Broken").len(), 1);
}
