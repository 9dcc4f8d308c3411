use crate::common::{FieldVec, Value, DOC_ID};
use crate::errors::{CopyError, CopyResult, ErrorKind};
use crate::schema::{FieldDeclaration, FieldKind};
use indexmap::IndexMap;

/// Whether documents of a type exist on their own or only inside a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Root,
    Embedded,
}

/// The declared-field table of one document type.
///
/// A `DocumentType` is built once, registered in a
/// [crate::schema::SchemaRegistry] and shared by every document of that type.
/// It lists the declared fields in declaration order. The identity field is
/// not part of that list: it is never enumerated, never copied and never
/// assignable.
///
/// # Examples
///
/// ```rust,ignore
/// let example = DocumentType::builder("CopyableExample")
///     .field("name")
///     .field("address")
///     .embeds_many("copyable_childs", "CopyableChild")
///     .build()?;
///
/// let child = DocumentType::embedded("CopyableChild")
///     .field("label")
///     .build()?;
/// ```
#[derive(Debug)]
pub struct DocumentType {
    name: String,
    kind: DocumentKind,
    identity_field: String,
    fields: IndexMap<String, FieldDeclaration>,
}

impl DocumentType {
    /// Starts declaring a root document type.
    pub fn builder(name: &str) -> DocumentTypeBuilder {
        DocumentTypeBuilder::new(name, DocumentKind::Root)
    }

    /// Starts declaring an embedded document type.
    pub fn embedded(name: &str) -> DocumentTypeBuilder {
        DocumentTypeBuilder::new(name, DocumentKind::Embedded)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn is_embedded(&self) -> bool {
        self.kind == DocumentKind::Embedded
    }

    pub fn identity_field(&self) -> &str {
        &self.identity_field
    }

    pub fn is_identity(&self, field: &str) -> bool {
        self.identity_field == field
    }

    /// Declared fields in declaration order, identity excluded.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.fields.values()
    }

    pub fn field_names(&self) -> FieldVec {
        self.fields.keys().cloned().collect()
    }

    pub fn scalar_fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.fields.values().filter(|f| f.is_scalar())
    }

    pub fn embedded_fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.fields.values().filter(|f| f.is_embedded())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.get(name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Looks up a declared field, failing with [ErrorKind::UnknownField].
    pub fn require_field(&self, name: &str) -> CopyResult<&FieldDeclaration> {
        match self.fields.get(name) {
            Some(declaration) => Ok(declaration),
            None => {
                log::error!("Field '{}' is not declared on document type '{}'", name, self.name);
                Err(CopyError::new(
                    &format!("Field '{}' is not declared on document type '{}'", name, self.name),
                    ErrorKind::UnknownField,
                ))
            }
        }
    }
}

/// Builder for [DocumentType].
///
/// Configuration errors are captured when they happen and returned from
/// [DocumentTypeBuilder::build]; the first one wins.
pub struct DocumentTypeBuilder {
    error: Option<CopyError>,
    name: String,
    kind: DocumentKind,
    identity_field: String,
    fields: IndexMap<String, FieldDeclaration>,
}

impl DocumentTypeBuilder {
    fn new(name: &str, kind: DocumentKind) -> Self {
        let mut builder = DocumentTypeBuilder {
            error: None,
            name: name.to_string(),
            kind,
            identity_field: DOC_ID.to_string(),
            fields: IndexMap::new(),
        };
        if name.trim().is_empty() {
            builder.capture("Document type name cannot be empty".to_string());
        }
        builder
    }

    /// Renames the identity field (default `_id`).
    pub fn identity_field(mut self, name: &str) -> Self {
        if name.trim().is_empty() {
            self.capture(format!("Identity field of '{}' cannot be empty", self.name));
        } else {
            self.identity_field = name.to_string();
        }
        self
    }

    /// Declares a scalar field without a default.
    pub fn field(self, name: &str) -> Self {
        self.declare(FieldDeclaration::scalar(name))
    }

    /// Declares a scalar field with a default applied at instantiation.
    pub fn field_with_default<T: Into<Value>>(self, name: &str, default_value: T) -> Self {
        self.declare(FieldDeclaration::scalar(name).with_default(default_value))
    }

    /// Declares an ordered collection of embedded documents.
    pub fn embeds_many(self, name: &str, embedded_type: &str) -> Self {
        if embedded_type.trim().is_empty() {
            let mut builder = self;
            builder.capture(format!("Embedded type of field '{}' cannot be empty", name));
            return builder;
        }
        self.declare(FieldDeclaration::embeds_many(name, embedded_type))
    }

    /// Adds a prepared declaration.
    pub fn declare(mut self, declaration: FieldDeclaration) -> Self {
        let name = declaration.name().to_string();
        if name.trim().is_empty() {
            self.capture(format!("Field name on '{}' cannot be empty", self.name));
        } else if self.fields.contains_key(&name) {
            self.capture(format!("Field '{}' is declared twice on '{}'", name, self.name));
        } else if declaration.is_embedded() && declaration.default_value().is_present() {
            self.capture(format!("Embedded collection '{}' cannot have a default value", name));
        } else {
            self.fields.insert(name, declaration);
        }
        self
    }

    pub fn build(self) -> CopyResult<DocumentType> {
        if let Some(error) = self.error {
            return Err(error);
        }

        if self.fields.contains_key(&self.identity_field) {
            log::error!(
                "Field '{}' on '{}' collides with the identity field",
                self.identity_field,
                self.name
            );
            return Err(CopyError::new(
                &format!(
                    "Field '{}' on '{}' collides with the identity field",
                    self.identity_field, self.name
                ),
                ErrorKind::InvalidSchema,
            ));
        }

        if let Some(self_reference) = self.fields.values().find(|f| {
            matches!(f.kind(), FieldKind::EmbeddedCollection { embedded_type } if *embedded_type == self.name)
        }) {
            log::error!("Field '{}' embeds its own type '{}'", self_reference.name(), self.name);
            return Err(CopyError::new(
                &format!("Field '{}' embeds its own type '{}'", self_reference.name(), self.name),
                ErrorKind::InvalidSchema,
            ));
        }

        Ok(DocumentType {
            name: self.name,
            kind: self.kind,
            identity_field: self.identity_field,
            fields: self.fields,
        })
    }

    fn capture(&mut self, message: String) {
        if self.error.is_none() {
            log::error!("{}", message);
            self.error = Some(CopyError::new(&message, ErrorKind::InvalidSchema));
        }
    }
}
