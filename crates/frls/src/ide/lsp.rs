use tower_lsp::lsp_types::{GotoDefinitionResponse, Location as LspLocation, Position as LspPosition, Range};

use crate::ide::navigation::{Location, NavigationTarget, Position};

pub fn lsp_position_to_ide(position: LspPosition) -> Position {
    Position::new(position.line, position.character)
}

pub fn ide_position_to_lsp(position: Position) -> LspPosition {
    LspPosition::new(position.line, position.character)
}

pub fn ide_location_to_lsp(location: Location) -> Option<LspLocation> {
    let uri = location.file.to_url()?;
    Some(LspLocation {
        uri,
        range: Range::new(ide_position_to_lsp(location.start), ide_position_to_lsp(location.end)),
    })
}

/// Zero matches serialize as `null`, one as a bare location and several as
/// an ordered array.
pub fn navigation_target_to_lsp(target: NavigationTarget) -> Option<GotoDefinitionResponse> {
    match target {
        NavigationTarget::Single(location) => ide_location_to_lsp(location).map(GotoDefinitionResponse::Scalar),
        NavigationTarget::Multiple(locations) => {
            let lsp_locations: Vec<LspLocation> = locations.into_iter().filter_map(ide_location_to_lsp).collect();
            if lsp_locations.is_empty() {
                None
            } else if lsp_locations.len() == 1 {
                lsp_locations.into_iter().next().map(GotoDefinitionResponse::Scalar)
            } else {
                Some(GotoDefinitionResponse::Array(lsp_locations))
            }
        },
    }
}

pub fn locations_to_lsp(locations: Vec<Location>) -> Option<GotoDefinitionResponse> {
    NavigationTarget::from_locations(locations).and_then(navigation_target_to_lsp)
}

#[cfg(test)]
#[path = "../../tests/src/ide/lsp_tests.rs"]
mod tests;
