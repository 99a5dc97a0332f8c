pub mod analysis;
pub mod config;
pub mod definition;
pub mod document;
pub mod ide;
pub mod progress;
pub mod server;
pub mod symbols;
pub mod syntax;
pub mod vfs;

pub use analysis::Analysis;
pub use config::{ServerSettings, StaleLocationPolicy};
pub use ide::{Location, NavigationTarget, Position};
pub use server::RubyLanguageServer;
pub use symbols::SymbolIndex;
pub use vfs::FileId;
