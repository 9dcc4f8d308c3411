use crate::document::{Document, DocumentId};
use crate::errors::{CopyError, CopyResult, ErrorKind};

/// Back-link from an embedded document to the collection that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedOwner {
    parent_id: DocumentId,
    field: String,
}

impl EmbeddedOwner {
    pub(crate) fn new(parent_id: DocumentId, field: &str) -> Self {
        EmbeddedOwner {
            parent_id,
            field: field.to_string(),
        }
    }

    pub fn parent_id(&self) -> DocumentId {
        self.parent_id
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

/// The ordered children of one embedded-collection field.
///
/// Order is insertion order. A child can only be added to the collection it
/// was created for, and no identity can appear twice.
#[derive(Debug)]
pub struct EmbeddedCollection {
    owner: EmbeddedOwner,
    embedded_type: String,
    children: Vec<Document>,
}

impl EmbeddedCollection {
    pub(crate) fn new(parent_id: DocumentId, field: &str, embedded_type: &str) -> Self {
        EmbeddedCollection {
            owner: EmbeddedOwner::new(parent_id, field),
            embedded_type: embedded_type.to_string(),
            children: Vec::new(),
        }
    }

    pub fn field(&self) -> &str {
        self.owner.field()
    }

    pub fn embedded_type(&self) -> &str {
        &self.embedded_type
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.children.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Document> {
        self.children.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.children.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Document> {
        self.children.get_mut(index)
    }

    pub fn first(&self) -> Option<&Document> {
        self.children.first()
    }

    pub fn last(&self) -> Option<&Document> {
        self.children.last()
    }

    pub fn find(&self, id: DocumentId) -> Option<&Document> {
        self.children.iter().find(|child| child.id() == id)
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.find(id).is_some()
    }

    pub fn ids(&self) -> Vec<DocumentId> {
        self.children.iter().map(Document::id).collect()
    }

    /// Appends a child created for this collection.
    ///
    /// Fails with [ErrorKind::InvalidOperation] when the child belongs to
    /// another parent or field or has the wrong type, and with
    /// [ErrorKind::IdentityCollision] when its identity is already present.
    pub fn push(&mut self, child: Document) -> CopyResult<&mut Document> {
        self.accepts(&child)?;

        if self.contains(child.id()) {
            log::error!("Embedded document {} is already present", child.id());
            return Err(CopyError::new(
                &format!(
                    "Embedded document {} is already present in collection '{}'",
                    child.id(),
                    self.owner.field()
                ),
                ErrorKind::IdentityCollision,
            ));
        }

        self.children.push(child);
        let last = self.children.len() - 1;
        Ok(&mut self.children[last])
    }

    /// Checks that `child` was created for this collection, without looking
    /// at its identity.
    pub(crate) fn accepts(&self, child: &Document) -> CopyResult<()> {
        if child.owner() != Some(&self.owner) {
            log::error!(
                "Embedded document {} is not owned by collection '{}' of {}",
                child.id(),
                self.owner.field(),
                self.owner.parent_id()
            );
            return Err(CopyError::new(
                &format!(
                    "Embedded document {} is not owned by collection '{}' of {}",
                    child.id(),
                    self.owner.field(),
                    self.owner.parent_id()
                ),
                ErrorKind::InvalidOperation,
            ));
        }

        if child.type_name() != self.embedded_type {
            log::error!(
                "Collection '{}' holds '{}' documents, got '{}'",
                self.owner.field(),
                self.embedded_type,
                child.type_name()
            );
            return Err(CopyError::new(
                &format!(
                    "Collection '{}' holds '{}' documents, got '{}'",
                    self.owner.field(),
                    self.embedded_type,
                    child.type_name()
                ),
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }

    /// Removes and returns the child with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: DocumentId) -> Option<Document> {
        let index = self.children.iter().position(|child| child.id() == id)?;
        Some(self.children.remove(index))
    }

    /// Removes all children, returning them in order.
    pub fn clear(&mut self) -> Vec<Document> {
        std::mem::take(&mut self.children)
    }
}

impl<'a> IntoIterator for &'a EmbeddedCollection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
