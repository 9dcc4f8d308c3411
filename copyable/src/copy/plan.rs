use crate::document::Document;
use crate::errors::{CopyError, CopyResult, ErrorKind};
use crate::schema::{FieldDeclaration, FieldKind, SchemaProvider};
use itertools::Itertools;
use std::collections::HashSet;

/// Which fields a copy operation covers.
#[derive(Debug, Clone, Copy)]
pub enum FieldSelection<'a> {
    /// Fields assigned on the source since instantiation, restricted to the
    /// given names when the slice is non-empty.
    Changed(&'a [&'a str]),
    /// Every declared field of the source type.
    All,
    /// Exactly the given names. Order does not matter and duplicates collapse.
    Explicit(&'a [&'a str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedKind {
    Scalar,
    Embedded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedField {
    name: String,
    kind: PlannedKind,
}

impl PlannedField {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlannedKind {
        self.kind
    }
}

/// A validated list of fields to copy from one document to another.
///
/// Building a plan performs every check a copy can fail on, so executing it
/// only mutates the destination once all of them passed. Declared fields and
/// identity names are resolved through the [SchemaProvider]. Fields are
/// listed in the source type's declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyPlan {
    fields: Vec<PlannedField>,
}

impl CopyPlan {
    pub fn build(
        schema: &dyn SchemaProvider,
        source: &Document,
        destination: &Document,
        selection: FieldSelection<'_>,
        require_same_type: bool,
    ) -> CopyResult<CopyPlan> {
        if require_same_type && source.type_name() != destination.type_name() {
            log::error!(
                "Cannot copy '{}' into '{}'",
                source.type_name(),
                destination.type_name()
            );
            return Err(CopyError::new(
                &format!(
                    "Cannot copy a '{}' document into a '{}' document",
                    source.type_name(),
                    destination.type_name()
                ),
                ErrorKind::TypeMismatch,
            ));
        }

        let source_fields = schema.declared_fields(source.type_name())?;
        let source_identity = schema.identity_field(source.type_name())?;
        let destination_fields = schema.declared_fields(destination.type_name())?;
        let names = Self::resolve_names(source, &source_fields, &source_identity, selection)?;

        let mut fields = Vec::with_capacity(names.len());
        let mut checked_types = HashSet::new();
        for declaration in &source_fields {
            if !names.contains(declaration.name()) {
                continue;
            }
            let target = Self::require_declared(
                destination.type_name(),
                &destination_fields,
                declaration.name(),
            )?;
            Self::ensure_compatible(
                source.type_name(),
                declaration,
                destination.type_name(),
                target,
            )?;

            let kind = match declaration.kind() {
                FieldKind::Scalar => PlannedKind::Scalar,
                FieldKind::EmbeddedCollection { embedded_type } => {
                    Self::ensure_embedded_type(schema, embedded_type, &mut checked_types)?;
                    PlannedKind::Embedded
                }
            };
            fields.push(PlannedField {
                name: declaration.name().to_string(),
                kind,
            });
        }

        log::debug!(
            "Copy plan from {} to {}: [{}]",
            source.id(),
            destination.id(),
            fields.iter().map(PlannedField::name).join(", ")
        );
        Ok(CopyPlan { fields })
    }

    pub fn fields(&self) -> &[PlannedField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|planned| planned.name == field)
    }

    fn resolve_names(
        source: &Document,
        declared: &[FieldDeclaration],
        identity: &str,
        selection: FieldSelection<'_>,
    ) -> CopyResult<HashSet<String>> {
        let type_name = source.type_name();
        match selection {
            FieldSelection::All => Ok(declared
                .iter()
                .map(|declaration| declaration.name().to_string())
                .collect()),
            FieldSelection::Explicit(names) => {
                Self::checked_names(type_name, declared, identity, names)
            }
            FieldSelection::Changed(filter) => {
                let filter = Self::checked_names(type_name, declared, identity, filter)?;
                Ok(source
                    .changed_fields()
                    .into_iter()
                    .filter(|field| filter.is_empty() || filter.contains(field))
                    .collect())
            }
        }
    }

    fn checked_names(
        type_name: &str,
        declared: &[FieldDeclaration],
        identity: &str,
        names: &[&str],
    ) -> CopyResult<HashSet<String>> {
        let mut checked = HashSet::with_capacity(names.len());
        for name in names {
            if *name == identity {
                log::warn!(
                    "Identity field '{}' of '{}' is never copied, ignoring it",
                    name,
                    type_name
                );
                continue;
            }
            Self::require_declared(type_name, declared, name)?;
            checked.insert(name.to_string());
        }
        Ok(checked)
    }

    fn require_declared<'a>(
        type_name: &str,
        declared: &'a [FieldDeclaration],
        name: &str,
    ) -> CopyResult<&'a FieldDeclaration> {
        match declared.iter().find(|declaration| declaration.name() == name) {
            Some(declaration) => Ok(declaration),
            None => {
                log::error!("Field '{}' is not declared on document type '{}'", name, type_name);
                Err(CopyError::new(
                    &format!("Field '{}' is not declared on document type '{}'", name, type_name),
                    ErrorKind::UnknownField,
                ))
            }
        }
    }

    fn ensure_compatible(
        source_type: &str,
        source: &FieldDeclaration,
        destination_type: &str,
        destination: &FieldDeclaration,
    ) -> CopyResult<()> {
        if source.kind() == destination.kind() {
            return Ok(());
        }
        log::error!(
            "Field '{}' is declared as {} on '{}' but as {} on '{}'",
            source.name(),
            source.kind(),
            source_type,
            destination.kind(),
            destination_type
        );
        Err(CopyError::new(
            &format!(
                "Field '{}' is declared as {} on '{}' but as {} on '{}'",
                source.name(),
                source.kind(),
                source_type,
                destination.kind(),
                destination_type
            ),
            ErrorKind::FieldKindMismatch,
        ))
    }

    fn ensure_embedded_type(
        schema: &dyn SchemaProvider,
        type_name: &str,
        checked: &mut HashSet<String>,
    ) -> CopyResult<()> {
        if !checked.insert(type_name.to_string()) {
            return Ok(());
        }

        let doc_type = schema.document_type(type_name)?;
        if !doc_type.is_embedded() {
            log::error!("Document type '{}' is not an embedded type", type_name);
            return Err(CopyError::new(
                &format!(
                    "Document type '{}' is used as an embedded collection but is not an embedded type",
                    type_name
                ),
                ErrorKind::InvalidSchema,
            ));
        }

        for declaration in doc_type.embedded_fields() {
            if let Some(nested) = declaration.embedded_type() {
                Self::ensure_embedded_type(schema, nested, checked)?;
            }
        }
        Ok(())
    }
}
