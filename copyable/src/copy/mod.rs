//! The copy engine.
//!
//! [DocumentCopier] is the entry point. It validates a copy into a
//! [CopyPlan], then hands scalar fields to [FieldCopier] and embedded
//! collections to [EmbeddedCopier].

mod config;
mod copier;
mod copier_builder;
mod embedded_copier;
mod field_copier;
mod options;
mod plan;
mod summary;

pub use config::*;
pub use copier::*;
pub use copier_builder::*;
pub use embedded_copier::*;
pub use field_copier::*;
pub use options::*;
pub use plan::*;
pub use summary::*;
