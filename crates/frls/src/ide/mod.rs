pub mod lsp;
pub mod navigation;

pub use navigation::{Location, NavigationTarget, Position};
