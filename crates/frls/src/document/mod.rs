pub(crate) mod registry;
pub(crate) mod source;

pub use registry::SourceRegistry;
pub use source::{OpenStatus, Source};
