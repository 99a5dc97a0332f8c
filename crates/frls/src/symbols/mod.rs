mod builder;
mod index;

pub use builder::{FileSymbols, build_for_source, location_of};
pub use index::SymbolIndex;
