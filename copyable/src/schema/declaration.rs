use crate::common::Value;

/// The kind of a declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A single [Value].
    Scalar,
    /// An ordered collection of embedded documents of `embedded_type`.
    EmbeddedCollection { embedded_type: String },
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Scalar => write!(f, "scalar"),
            FieldKind::EmbeddedCollection { embedded_type } => {
                write!(f, "embedded collection of '{}'", embedded_type)
            }
        }
    }
}

/// One entry of a document type's declared-field table.
///
/// Scalar declarations may carry a default value. Defaults are applied when a
/// document is instantiated and are not recorded as changes.
///
/// # Examples
///
/// ```rust,ignore
/// let name = FieldDeclaration::scalar("name");
/// let status = FieldDeclaration::scalar("status").with_default("draft");
/// let children = FieldDeclaration::embeds_many("copyable_childs", "CopyableChild");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    name: String,
    kind: FieldKind,
    default_value: Value,
}

impl FieldDeclaration {
    pub fn scalar(name: &str) -> Self {
        FieldDeclaration {
            name: name.to_string(),
            kind: FieldKind::Scalar,
            default_value: Value::Null,
        }
    }

    pub fn embeds_many(name: &str, embedded_type: &str) -> Self {
        FieldDeclaration {
            name: name.to_string(),
            kind: FieldKind::EmbeddedCollection {
                embedded_type: embedded_type.to_string(),
            },
            default_value: Value::Null,
        }
    }

    pub fn with_default<T: Into<Value>>(mut self, value: T) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, FieldKind::Scalar)
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.kind, FieldKind::EmbeddedCollection { .. })
    }

    /// Name of the embedded document type, for collection fields.
    pub fn embedded_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::EmbeddedCollection { embedded_type } => Some(embedded_type),
            FieldKind::Scalar => None,
        }
    }
}
