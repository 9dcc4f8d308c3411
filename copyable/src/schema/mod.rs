//! Document type declarations and the registry that holds them.

mod declaration;
mod document_type;
mod registry;

pub use declaration::*;
pub use document_type::*;
pub use registry::*;
