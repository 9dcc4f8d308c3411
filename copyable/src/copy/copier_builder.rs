use crate::copy::{CopierConfig, CopyOptions, DocumentCopier};
use crate::errors::{CopyError, CopyResult, ErrorKind};
use crate::schema::SchemaProvider;
use std::sync::Arc;

/// Builder for [DocumentCopier].
///
/// A schema is mandatory. The first configuration error is kept and returned
/// from [DocumentCopierBuilder::build].
///
/// # Examples
///
/// ```rust,ignore
/// let copier = DocumentCopier::builder()
///     .schema(registry.clone())
///     .default_options(CopyOptions::default().with_overwrite_nil_only(true))
///     .require_same_type(false)
///     .build()?;
/// ```
#[derive(Default)]
pub struct DocumentCopierBuilder {
    error: Option<CopyError>,
    schema: Option<Arc<dyn SchemaProvider>>,
    config: CopierConfig,
}

impl DocumentCopierBuilder {
    pub fn new() -> Self {
        DocumentCopierBuilder {
            error: None,
            schema: None,
            config: CopierConfig::new(),
        }
    }

    /// Sets the schema the copier resolves document types against.
    pub fn schema<S: SchemaProvider + 'static>(self, schema: S) -> Self {
        self.shared_schema(Arc::new(schema))
    }

    /// Like [DocumentCopierBuilder::schema] for an already shared provider.
    pub fn shared_schema(mut self, schema: Arc<dyn SchemaProvider>) -> Self {
        if self.error.is_none() {
            if self.schema.is_some() {
                log::error!("Schema is already set for this copier");
                self.error = Some(CopyError::new(
                    "Schema is already set for this copier",
                    ErrorKind::InvalidOperation,
                ));
            } else {
                self.schema = Some(schema);
            }
        }
        self
    }

    pub fn default_options(mut self, options: CopyOptions) -> Self {
        self.config.set_default_options(options);
        self
    }

    pub fn require_same_type(mut self, require_same_type: bool) -> Self {
        self.config.set_require_same_type(require_same_type);
        self
    }

    pub fn build(self) -> CopyResult<DocumentCopier> {
        if let Some(error) = self.error {
            return Err(error);
        }
        match self.schema {
            Some(schema) => Ok(DocumentCopier::with_config(schema, self.config)),
            None => {
                log::error!("A schema is required to build a copier");
                Err(CopyError::new(
                    "A schema is required to build a copier",
                    ErrorKind::InvalidOperation,
                ))
            }
        }
    }
}
