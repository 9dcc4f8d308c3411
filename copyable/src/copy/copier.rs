use crate::copy::{
    CopierConfig, CopyOptions, CopyPlan, CopySummary, DocumentCopierBuilder, EmbeddedCopier,
    FieldCopier, FieldOutcome, FieldSelection, MergePolicy, PlannedKind,
};
use crate::document::Document;
use crate::errors::{CopyError, CopyResult, ErrorKind};
use crate::schema::SchemaProvider;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Copies field values from one document to another.
///
/// The copier is stateless per call. It holds the schema used to resolve
/// embedded types and construct fresh embedded children, and a
/// [CopierConfig]. Clones share both.
///
/// Every operation first validates the whole copy into a [CopyPlan] and
/// builds every embedded duplicate; the destination is mutated only after
/// all of that succeeded. Identities are never copied: the destination keeps
/// its own, and duplicated embedded children receive new ones.
///
/// # Examples
///
/// ```rust,ignore
/// let copier = DocumentCopier::new(registry.clone());
///
/// // copy what was assigned on `a`
/// copier.copy_changes_to(&a, &mut b, &[])?;
///
/// // copy everything, duplicating embedded children
/// copier.copy_to(&a, &mut b)?;
///
/// // copy some fields, filling only gaps
/// copier.copy_fields_to(&a, &mut b, &["address", "copyable_childs"], overwrite_nil_only())?;
/// ```
#[derive(Clone)]
pub struct DocumentCopier {
    inner: Arc<DocumentCopierInner>,
}

impl DocumentCopier {
    pub fn builder() -> DocumentCopierBuilder {
        DocumentCopierBuilder::new()
    }

    /// Creates a copier with the default [CopierConfig].
    pub fn new<S: SchemaProvider + 'static>(schema: S) -> Self {
        Self::with_config(Arc::new(schema), CopierConfig::default())
    }

    pub(crate) fn with_config(schema: Arc<dyn SchemaProvider>, config: CopierConfig) -> Self {
        DocumentCopier {
            inner: Arc::new(DocumentCopierInner { schema, config }),
        }
    }

    pub fn config(&self) -> &CopierConfig {
        &self.inner.config
    }

    pub fn schema(&self) -> &Arc<dyn SchemaProvider> {
        &self.inner.schema
    }

    /// Copies the fields assigned on `source` since it was instantiated.
    ///
    /// When `fields` is non-empty only changed fields among them are copied.
    /// Changed values are copied as they are, absent ones included.
    pub fn copy_changes_to(
        &self,
        source: &Document,
        destination: &mut Document,
        fields: &[&str],
    ) -> CopyResult<CopySummary> {
        self.inner
            .copy(source, destination, FieldSelection::Changed(fields), MergePolicy::ALWAYS)
    }

    /// Copies every declared field of `source`. Scalars are copied as they
    /// are and embedded collections are duplicated.
    pub fn copy_to(&self, source: &Document, destination: &mut Document) -> CopyResult<CopySummary> {
        self.inner
            .copy(source, destination, FieldSelection::All, MergePolicy::ALWAYS)
    }

    /// Copies exactly `fields` under `options`. Embedded collections among
    /// them are always duplicated, whatever the options say.
    pub fn copy_fields_to(
        &self,
        source: &Document,
        destination: &mut Document,
        fields: &[&str],
        options: CopyOptions,
    ) -> CopyResult<CopySummary> {
        self.inner.copy(
            source,
            destination,
            FieldSelection::Explicit(fields),
            MergePolicy::from(options),
        )
    }

    /// [DocumentCopier::copy_fields_to] with the configured default options.
    pub fn copy_fields_with_defaults(
        &self,
        source: &Document,
        destination: &mut Document,
        fields: &[&str],
    ) -> CopyResult<CopySummary> {
        let options = self.inner.config.default_options();
        self.copy_fields_to(source, destination, fields, options)
    }
}

impl Debug for DocumentCopier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCopier")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

struct DocumentCopierInner {
    schema: Arc<dyn SchemaProvider>,
    config: CopierConfig,
}

impl DocumentCopierInner {
    fn copy(
        &self,
        source: &Document,
        destination: &mut Document,
        selection: FieldSelection<'_>,
        policy: MergePolicy,
    ) -> CopyResult<CopySummary> {
        let plan = CopyPlan::build(
            self.schema.as_ref(),
            source,
            destination,
            selection,
            self.config.require_same_type(),
        )?;

        let embedded_copier = EmbeddedCopier::new(self.schema.as_ref());
        let mut prepared = Vec::new();
        for planned in plan.fields() {
            if planned.kind() == PlannedKind::Embedded {
                let duplicates = embedded_copier.prepare(source, destination, planned.name())?;
                prepared.push((planned.name(), duplicates));
            }
        }

        self.apply(&plan, source, destination, policy, &embedded_copier, prepared)
            .map_err(|cause| {
                log::error!(
                    "Copy from {} to {} failed after validation: {}",
                    source.id(),
                    destination.id(),
                    cause
                );
                CopyError::new_with_cause(
                    &format!(
                        "Copy from {} to {} failed after validation",
                        source.id(),
                        destination.id()
                    ),
                    ErrorKind::InternalError,
                    cause,
                )
            })
    }

    fn apply(
        &self,
        plan: &CopyPlan,
        source: &Document,
        destination: &mut Document,
        policy: MergePolicy,
        embedded_copier: &EmbeddedCopier<'_>,
        prepared: Vec<(&str, Vec<Document>)>,
    ) -> CopyResult<CopySummary> {
        let field_copier = FieldCopier::new();
        let mut summary = CopySummary::new();

        for planned in plan.fields() {
            if planned.kind() == PlannedKind::Scalar {
                match field_copier.copy_field(source, destination, planned.name(), policy)? {
                    FieldOutcome::Copied => summary.record_copied(planned.name()),
                    FieldOutcome::Skipped(reason) => summary.record_skipped(planned.name(), reason),
                }
            }
        }

        for (field, duplicates) in prepared {
            let count = embedded_copier.append(destination, field, duplicates)?;
            summary.record_embedded(field, count);
        }

        log::debug!("Copied {} to {}: {}", source.id(), destination.id(), summary);
        Ok(summary)
    }
}
