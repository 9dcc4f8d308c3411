//! # Copyable - field-level document copy engine
//!
//! Copyable copies field values between two instances of a hierarchical
//! document type: a root document with scalar fields plus ordered
//! collections of embedded documents. Copies follow configurable merge
//! policies, and embedded children are always duplicated with freshly minted
//! identities so a copy never aliases its original.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use copyable::attrs;
//! use copyable::copy::{CopyOptions, DocumentCopier};
//! use copyable::schema::{DocumentType, SchemaRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new();
//! registry.register(DocumentType::embedded("CopyableChild").field("label").build()?)?;
//! registry.register(
//!     DocumentType::builder("CopyableExample")
//!         .field("name")
//!         .field("address")
//!         .embeds_many("copyable_childs", "CopyableChild")
//!         .build()?,
//! )?;
//!
//! let mut a = registry.new_document_with("CopyableExample", attrs! { name: "1", address: "2" })?;
//! registry.build_child_with(&mut a, "copyable_childs", attrs! { label: "a" })?;
//! let mut b = registry.new_document("CopyableExample")?;
//!
//! let copier = DocumentCopier::new(registry.clone());
//! copier.copy_fields_to(&a, &mut b, &["address", "copyable_childs"], CopyOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Values, constants and shared helpers
//! - [`copy`] - The copy engine: options, plans and the [`copy::DocumentCopier`]
//! - [`document`] - Document instances, identities and change tracking
//! - [`errors`] - Error types and result definitions
//! - [`schema`] - Document type declarations and the schema registry

use crate::document::SnowflakeIdGenerator;
use std::sync::LazyLock;

pub mod common;
pub mod copy;
pub mod document;
pub mod errors;
pub mod schema;

pub(crate) static ID_GENERATOR: LazyLock<SnowflakeIdGenerator> =
    LazyLock::new(SnowflakeIdGenerator::new);
