pub(crate) mod discovery;
pub(crate) mod handler;
pub(crate) mod state;

pub use discovery::{DiscoveredFile, discover_ruby_files};
pub use state::RubyLanguageServer;
