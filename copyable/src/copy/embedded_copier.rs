use crate::document::{Document, DocumentId};
use crate::errors::{CopyError, CopyResult, ErrorKind};
use crate::schema::SchemaProvider;
use std::collections::HashSet;

/// Duplicates embedded collections from one parent into another.
///
/// Every source child is rebuilt under the destination parent with a freshly
/// minted identity and all of its scalar values. Nested embedded collections
/// are rebuilt the same way at every depth. Duplicates are appended after any
/// children the destination already has, in source order.
pub struct EmbeddedCopier<'a> {
    schema: &'a dyn SchemaProvider,
}

impl<'a> EmbeddedCopier<'a> {
    pub fn new(schema: &'a dyn SchemaProvider) -> Self {
        EmbeddedCopier { schema }
    }

    /// Appends a duplicate of every child of `source_parent`'s collection
    /// `field` to the same collection of `destination_parent` and returns
    /// how many children were appended.
    ///
    /// All duplicates are built before the first one is appended, so a
    /// failure leaves the destination collection unchanged.
    pub fn copy_collection(
        &self,
        source_parent: &Document,
        destination_parent: &mut Document,
        field: &str,
    ) -> CopyResult<usize> {
        let duplicates = self.prepare(source_parent, destination_parent, field)?;
        self.append(destination_parent, field, duplicates)
    }

    /// Builds detached duplicates of every child of `source_parent`'s
    /// collection `field`, owned by `destination_parent`'s collection of the
    /// same name. Nothing is appended yet.
    ///
    /// Every duplicate is checked against what [EmbeddedCopier::append] will
    /// demand of it: it belongs to the destination collection and its
    /// identity is neither present there nor shared with another duplicate.
    pub fn prepare(
        &self,
        source_parent: &Document,
        destination_parent: &Document,
        field: &str,
    ) -> CopyResult<Vec<Document>> {
        let source = source_parent.collection(field)?;
        let destination = destination_parent.collection(field)?;
        if source.is_empty() {
            log::debug!("Collection '{}' of {} is empty", field, source_parent.id());
            return Ok(Vec::new());
        }

        let mut taken: HashSet<DocumentId> = destination.ids().into_iter().collect();
        let mut duplicates = Vec::with_capacity(source.len());
        for child in source {
            let duplicate = self.duplicate(child, destination_parent, field)?;
            destination.accepts(&duplicate)?;
            if !taken.insert(duplicate.id()) {
                log::error!(
                    "Duplicate of embedded document {} got identity {} already used in '{}'",
                    child.id(),
                    duplicate.id(),
                    field
                );
                return Err(CopyError::new(
                    &format!(
                        "Duplicate of embedded document {} got identity {} already used in '{}' of {}",
                        child.id(),
                        duplicate.id(),
                        field,
                        destination_parent.id()
                    ),
                    ErrorKind::IdentityCollision,
                ));
            }
            duplicates.push(duplicate);
        }
        Ok(duplicates)
    }

    /// Appends prepared duplicates in order and returns how many were added.
    pub fn append(
        &self,
        destination_parent: &mut Document,
        field: &str,
        duplicates: Vec<Document>,
    ) -> CopyResult<usize> {
        let count = duplicates.len();
        for duplicate in duplicates {
            destination_parent.push_child(field, duplicate)?;
        }
        if count > 0 {
            log::debug!(
                "Appended {} children to '{}' of {}",
                count,
                field,
                destination_parent.id()
            );
        }
        Ok(count)
    }

    fn duplicate(&self, child: &Document, owner: &Document, field: &str) -> CopyResult<Document> {
        let mut duplicate = self
            .schema
            .new_embedded_child(child.type_name(), owner, field)?;

        if duplicate.id() == child.id() {
            log::error!(
                "Duplicate of embedded document {} reused its identity",
                child.id()
            );
            return Err(CopyError::new(
                &format!(
                    "Duplicate of embedded document {} in '{}' reused its identity",
                    child.id(),
                    field
                ),
                ErrorKind::IdentityCollision,
            ));
        }

        let doc_type = child.doc_type().clone();
        for declaration in doc_type.scalar_fields() {
            let value = child.get(declaration.name())?;
            duplicate.put(declaration.name(), value)?;
        }

        for declaration in doc_type.embedded_fields() {
            let nested = child.collection(declaration.name())?;
            let mut grandchildren = Vec::with_capacity(nested.len());
            for grandchild in nested {
                grandchildren.push(self.duplicate(grandchild, &duplicate, declaration.name())?);
            }
            for grandchild in grandchildren {
                duplicate.push_child(declaration.name(), grandchild)?;
            }
        }

        log::trace!("Embedded document {} duplicated as {}", child.id(), duplicate.id());
        Ok(duplicate)
    }
}
