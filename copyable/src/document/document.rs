use im::OrdMap;

use crate::common::{FieldVec, Value};
use crate::document::{ChangeTracker, DocumentId, EmbeddedCollection, EmbeddedOwner};
use crate::errors::{CopyError, CopyResult, ErrorKind};
use crate::schema::{DocumentType, FieldKind};
use indexmap::IndexMap;
use std::sync::Arc;

/// An in-memory instance of a [DocumentType].
///
/// A document owns its identity, the values of its declared scalar fields,
/// one [EmbeddedCollection] per declared embedded-collection field and a
/// [ChangeTracker]. Embedded documents additionally know the parent
/// collection they belong to.
///
/// `Document` is not `Clone`: a clone would carry the same
/// identity as its original. Use [crate::copy::DocumentCopier] to duplicate
/// field values into another instance.
///
/// Scalar values are held in a persistent ordered map, so reading a value
/// out for a copy is cheap.
#[derive(Debug)]
pub struct Document {
    pub(crate) doc_type: Arc<DocumentType>,
    pub(crate) id: DocumentId,
    pub(crate) data: OrdMap<String, Value>,
    pub(crate) collections: IndexMap<String, EmbeddedCollection>,
    pub(crate) changes: ChangeTracker,
    pub(crate) owner: Option<EmbeddedOwner>,
}

impl Document {
    /// Instantiates a fresh root document with a new identity.
    ///
    /// Declared defaults are applied without being recorded as changes.
    /// Fails with [ErrorKind::InvalidOperation] for embedded types, which can
    /// only be created under a parent.
    pub fn new(doc_type: Arc<DocumentType>) -> CopyResult<Self> {
        Self::ensure_root(&doc_type)?;
        Ok(Self::instantiate(doc_type, DocumentId::new(), None))
    }

    /// Instantiates a root document as if loaded from storage.
    ///
    /// `values` are validated against the type but not recorded as changes.
    pub fn load(
        doc_type: Arc<DocumentType>,
        id: DocumentId,
        values: Vec<(String, Value)>,
    ) -> CopyResult<Self> {
        Self::ensure_root(&doc_type)?;
        let mut document = Self::instantiate(doc_type, id, None);
        document.restore(values)?;
        Ok(document)
    }

    /// Creates a detached embedded document for `owner`'s collection `field`
    /// with a freshly minted identity.
    pub fn new_embedded(
        doc_type: Arc<DocumentType>,
        owner: &Document,
        field: &str,
    ) -> CopyResult<Self> {
        Self::ensure_embeddable(&doc_type, owner, field)?;
        let link = EmbeddedOwner::new(owner.id(), field);
        Ok(Self::instantiate(doc_type, DocumentId::new(), Some(link)))
    }

    /// Restores a detached embedded document with a known identity and an
    /// empty change set.
    pub fn load_embedded(
        doc_type: Arc<DocumentType>,
        owner: &Document,
        field: &str,
        id: DocumentId,
        values: Vec<(String, Value)>,
    ) -> CopyResult<Self> {
        Self::ensure_embeddable(&doc_type, owner, field)?;
        let link = EmbeddedOwner::new(owner.id(), field);
        let mut document = Self::instantiate(doc_type, id, Some(link));
        document.restore(values)?;
        Ok(document)
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn doc_type(&self) -> &Arc<DocumentType> {
        &self.doc_type
    }

    pub fn type_name(&self) -> &str {
        self.doc_type.name()
    }

    pub fn is_embedded(&self) -> bool {
        self.owner.is_some()
    }

    /// The owning collection, for embedded documents.
    pub fn owner(&self) -> Option<&EmbeddedOwner> {
        self.owner.as_ref()
    }

    pub fn collection(&self, field: &str) -> CopyResult<&EmbeddedCollection> {
        self.ensure_collection_field(field)?;
        self.collections
            .get(field)
            .ok_or_else(|| Self::missing_collection(field))
    }

    pub fn collection_mut(&mut self, field: &str) -> CopyResult<&mut EmbeddedCollection> {
        self.ensure_collection_field(field)?;
        self.collections
            .get_mut(field)
            .ok_or_else(|| Self::missing_collection(field))
    }

    /// Appends an embedded child to collection `field`. See
    /// [EmbeddedCollection::push] for the ownership rules.
    pub fn push_child(&mut self, field: &str, child: Document) -> CopyResult<&mut Document> {
        self.collection_mut(field)?.push(child)
    }

    pub fn remove_child(&mut self, field: &str, id: DocumentId) -> CopyResult<Option<Document>> {
        Ok(self.collection_mut(field)?.remove(id))
    }

    /// Scalar fields assigned since instantiation, in first-assignment order.
    pub fn changed_fields(&self) -> FieldVec {
        self.changes.changed_fields()
    }

    pub fn is_changed(&self, field: &str) -> bool {
        self.changes.contains(field)
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// The value `field` held before its first assignment.
    pub fn original_value(&self, field: &str) -> Option<&Value> {
        self.changes.original_value(field)
    }

    pub fn change_tracker(&self) -> &ChangeTracker {
        &self.changes
    }

    /// Forgets recorded changes on this document. Embedded children keep
    /// their own trackers.
    pub fn commit_changes(&mut self) {
        self.changes.clear();
    }

    fn instantiate(
        doc_type: Arc<DocumentType>,
        id: DocumentId,
        owner: Option<EmbeddedOwner>,
    ) -> Self {
        let mut data = OrdMap::new();
        let mut collections = IndexMap::new();
        for declaration in doc_type.fields() {
            match declaration.kind() {
                FieldKind::Scalar => {
                    if declaration.default_value().is_present() {
                        data.insert(
                            declaration.name().to_string(),
                            declaration.default_value().clone(),
                        );
                    }
                }
                FieldKind::EmbeddedCollection { embedded_type } => {
                    collections.insert(
                        declaration.name().to_string(),
                        EmbeddedCollection::new(id, declaration.name(), embedded_type),
                    );
                }
            }
        }

        Document {
            doc_type,
            id,
            data,
            collections,
            changes: ChangeTracker::new(),
            owner,
        }
    }

    fn restore(&mut self, values: Vec<(String, Value)>) -> CopyResult<()> {
        for (field, value) in values {
            self.write_scalar(&field, value)?;
        }
        Ok(())
    }

    fn ensure_root(doc_type: &DocumentType) -> CopyResult<()> {
        if doc_type.is_embedded() {
            log::error!(
                "Embedded document type '{}' can only be created under a parent",
                doc_type.name()
            );
            return Err(CopyError::new(
                &format!(
                    "Embedded document type '{}' can only be created under a parent",
                    doc_type.name()
                ),
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }

    fn ensure_embeddable(doc_type: &DocumentType, owner: &Document, field: &str) -> CopyResult<()> {
        if !doc_type.is_embedded() {
            log::error!("Document type '{}' is not an embedded type", doc_type.name());
            return Err(CopyError::new(
                &format!("Document type '{}' is not an embedded type", doc_type.name()),
                ErrorKind::InvalidOperation,
            ));
        }

        let declaration = owner.doc_type.require_field(field)?;
        match declaration.embedded_type() {
            Some(embedded_type) if embedded_type == doc_type.name() => Ok(()),
            Some(embedded_type) => {
                log::error!(
                    "Field '{}' of '{}' embeds '{}', not '{}'",
                    field,
                    owner.type_name(),
                    embedded_type,
                    doc_type.name()
                );
                Err(CopyError::new(
                    &format!(
                        "Field '{}' of '{}' embeds '{}', not '{}'",
                        field,
                        owner.type_name(),
                        embedded_type,
                        doc_type.name()
                    ),
                    ErrorKind::FieldKindMismatch,
                ))
            }
            None => Err(Self::not_a_collection(owner.type_name(), field)),
        }
    }

    fn ensure_collection_field(&self, field: &str) -> CopyResult<()> {
        let declaration = self.doc_type.require_field(field)?;
        if declaration.is_embedded() {
            Ok(())
        } else {
            Err(Self::not_a_collection(self.type_name(), field))
        }
    }

    fn not_a_collection(type_name: &str, field: &str) -> CopyError {
        log::error!("Field '{}' of '{}' is not an embedded collection", field, type_name);
        CopyError::new(
            &format!("Field '{}' of '{}' is not an embedded collection", field, type_name),
            ErrorKind::FieldKindMismatch,
        )
    }

    fn missing_collection(field: &str) -> CopyError {
        log::error!("Embedded collection '{}' was not initialized", field);
        CopyError::new(
            &format!("Embedded collection '{}' was not initialized", field),
            ErrorKind::InternalError,
        )
    }
}
