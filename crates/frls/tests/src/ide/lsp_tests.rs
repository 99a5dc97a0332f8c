use super::*;
use crate::vfs::FileId;

fn location(
    path: &str,
    line: u32,
) -> Location {
    Location::new(FileId::new(path), Position::new(line, 6), Position::new(line, 11))
}

#[test]
fn no_locations_serialize_as_null() {
    assert_eq!(locations_to_lsp(Vec::new()), None);
}

#[test]
fn single_location_serializes_as_scalar() {
    let response = locations_to_lsp(vec![location("/repo/lib/a.rb", 3)]);
    let Some(GotoDefinitionResponse::Scalar(loc)) = response else {
        panic!("expected scalar response, got {response:?}");
    };
    assert_eq!(loc.uri.path(), "/repo/lib/a.rb");
    assert_eq!(loc.range.start, LspPosition::new(3, 6));
    assert_eq!(loc.range.end, LspPosition::new(3, 11));
}

#[test]
fn several_locations_keep_their_order() {
    let response = locations_to_lsp(vec![location("/repo/lib/b.rb", 1), location("/repo/lib/a.rb", 7)]);
    let Some(GotoDefinitionResponse::Array(locs)) = response else {
        panic!("expected array response, got {response:?}");
    };
    let paths: Vec<&str> = locs.iter().map(|l| l.uri.path()).collect();
    assert_eq!(paths, vec!["/repo/lib/b.rb", "/repo/lib/a.rb"]);
}

#[test]
fn lsp_positions_map_one_to_one() {
    let pos = lsp_position_to_ide(LspPosition::new(4, 2));
    assert_eq!(pos, Position::new(4, 2));
    assert_eq!(ide_position_to_lsp(pos), LspPosition::new(4, 2));
}
