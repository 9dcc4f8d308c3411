use crate::common::{atomic, Atomic, ReadExecutor, Value, WriteExecutor};
use crate::document::{Document, DocumentId};
use crate::errors::{CopyError, CopyResult, ErrorKind};
use crate::schema::{DocumentType, FieldDeclaration};
use indexmap::IndexMap;
use std::sync::Arc;

/// The schema collaborator the copy engine depends on.
///
/// It answers three questions about a document type by name (its declared
/// fields, its identity field, the type itself) and constructs fresh embedded
/// children with newly minted identities. Copy plans take the field list and
/// identity name of both documents from [SchemaProvider::declared_fields] and
/// [SchemaProvider::identity_field], which must agree with the types the
/// documents were built from. [SchemaRegistry] is the shipped implementation;
/// hosts with their own type catalogue can implement this trait directly.
pub trait SchemaProvider: Send + Sync {
    /// Resolves a registered document type, failing with
    /// [ErrorKind::SchemaNotFound].
    fn document_type(&self, type_name: &str) -> CopyResult<Arc<DocumentType>>;

    /// Declared fields of a type in declaration order, identity excluded.
    fn declared_fields(&self, type_name: &str) -> CopyResult<Vec<FieldDeclaration>> {
        Ok(self.document_type(type_name)?.fields().cloned().collect())
    }

    fn identity_field(&self, type_name: &str) -> CopyResult<String> {
        Ok(self.document_type(type_name)?.identity_field().to_string())
    }

    /// Creates a detached embedded document of `type_name` owned by
    /// `owner`'s collection `field`, with a freshly minted identity.
    ///
    /// The child is not added to the collection; push it with
    /// [Document::push_child].
    fn new_embedded_child(
        &self,
        type_name: &str,
        owner: &Document,
        field: &str,
    ) -> CopyResult<Document> {
        let doc_type = self.document_type(type_name)?;
        Document::new_embedded(doc_type, owner, field)
    }
}

/// An explicit registry of document types.
///
/// The registry is passed to whatever needs it (document construction, the
/// [crate::copy::DocumentCopier]) instead of living in global state. Clones
/// share the same underlying table.
///
/// # Examples
///
/// ```rust,ignore
/// let registry = SchemaRegistry::new();
/// registry.register(DocumentType::embedded("CopyableChild").field("label").build()?)?;
/// registry.register(
///     DocumentType::builder("CopyableExample")
///         .field("name")
///         .field("address")
///         .embeds_many("copyable_childs", "CopyableChild")
///         .build()?,
/// )?;
///
/// let mut a = registry.new_document_with("CopyableExample", attrs! { name: "name" })?;
/// registry.build_child_with(&mut a, "copyable_childs", attrs! { label: "a" })?;
/// ```
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    types: Atomic<IndexMap<String, Arc<DocumentType>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        SchemaRegistry {
            types: atomic(IndexMap::new()),
        }
    }

    /// Registers a document type. Names are unique within a registry.
    pub fn register(&self, doc_type: DocumentType) -> CopyResult<Arc<DocumentType>> {
        self.types.write_with(|types| {
            if types.contains_key(doc_type.name()) {
                log::error!("Document type '{}' is already registered", doc_type.name());
                return Err(CopyError::new(
                    &format!("Document type '{}' is already registered", doc_type.name()),
                    ErrorKind::SchemaAlreadyRegistered,
                ));
            }

            let doc_type = Arc::new(doc_type);
            types.insert(doc_type.name().to_string(), doc_type.clone());
            log::debug!("Registered document type '{}'", doc_type.name());
            Ok(doc_type)
        })
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.read_with(|types| types.contains_key(type_name))
    }

    /// Registered type names in registration order.
    pub fn type_names(&self) -> Vec<String> {
        self.types.read_with(|types| types.keys().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.types.read_with(|types| types.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Instantiates a fresh root document with defaults applied.
    pub fn new_document(&self, type_name: &str) -> CopyResult<Document> {
        Document::new(self.document_type(type_name)?)
    }

    /// Instantiates a fresh root document and assigns `attributes` to it.
    ///
    /// The assignments are recorded as changes, as if made one by one after
    /// construction.
    pub fn new_document_with(
        &self,
        type_name: &str,
        attributes: Vec<(String, Value)>,
    ) -> CopyResult<Document> {
        let mut document = self.new_document(type_name)?;
        for (field, value) in attributes {
            document.put(&field, value)?;
        }
        Ok(document)
    }

    /// Instantiates a root document as if it was loaded from storage, with
    /// the given identity and values and an empty change set.
    pub fn load_document(
        &self,
        type_name: &str,
        id: DocumentId,
        values: Vec<(String, Value)>,
    ) -> CopyResult<Document> {
        Document::load(self.document_type(type_name)?, id, values)
    }

    /// Creates a new embedded child in `parent`'s collection `field` and
    /// returns it. The child type comes from the parent's declaration.
    pub fn build_child<'a>(
        &self,
        parent: &'a mut Document,
        field: &str,
    ) -> CopyResult<&'a mut Document> {
        let embedded_type = parent.collection(field)?.embedded_type().to_string();
        let child = self.new_embedded_child(&embedded_type, parent, field)?;
        parent.push_child(field, child)
    }

    /// Like [SchemaRegistry::build_child], then assigns `attributes`.
    pub fn build_child_with<'a>(
        &self,
        parent: &'a mut Document,
        field: &str,
        attributes: Vec<(String, Value)>,
    ) -> CopyResult<&'a mut Document> {
        let child = self.build_child(parent, field)?;
        for (name, value) in attributes {
            child.put(&name, value)?;
        }
        Ok(child)
    }

    /// Appends an embedded child restored from storage, keeping its identity
    /// and leaving its change set empty.
    pub fn load_child<'a>(
        &self,
        parent: &'a mut Document,
        field: &str,
        id: DocumentId,
        values: Vec<(String, Value)>,
    ) -> CopyResult<&'a mut Document> {
        let embedded_type = parent.collection(field)?.embedded_type().to_string();
        let doc_type = self.document_type(&embedded_type)?;
        let child = Document::load_embedded(doc_type, parent, field, id, values)?;
        parent.push_child(field, child)
    }
}

impl SchemaProvider for SchemaRegistry {
    fn document_type(&self, type_name: &str) -> CopyResult<Arc<DocumentType>> {
        match self.types.read_with(|types| types.get(type_name).cloned()) {
            Some(doc_type) => Ok(doc_type),
            None => {
                log::error!("Document type '{}' is not registered", type_name);
                Err(CopyError::new(
                    &format!("Document type '{}' is not registered", type_name),
                    ErrorKind::SchemaNotFound,
                ))
            }
        }
    }
}
