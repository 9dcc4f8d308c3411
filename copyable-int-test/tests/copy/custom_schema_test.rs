use copyable::common::Value;
use copyable::copy::{CopyOptions, DocumentCopier};
use copyable::document::Document;
use copyable::errors::{CopyError, CopyResult, ErrorKind};
use copyable::schema::{DocumentType, SchemaProvider};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A fixed catalogue that counts the embedded children it constructs.
struct CountingCatalogue {
    types: HashMap<String, Arc<DocumentType>>,
    built: AtomicUsize,
}

impl CountingCatalogue {
    fn new() -> CopyResult<Self> {
        let mut types = HashMap::new();
        let child = DocumentType::embedded("Attachment").field("file").build()?;
        let parent = DocumentType::builder("Ticket")
            .identity_field("ticket_id")
            .field("title")
            .embeds_many("attachments", "Attachment")
            .build()?;
        types.insert(child.name().to_string(), Arc::new(child));
        types.insert(parent.name().to_string(), Arc::new(parent));
        Ok(CountingCatalogue {
            types,
            built: AtomicUsize::new(0),
        })
    }

    fn ticket(&self, title: &str, files: &[&str]) -> CopyResult<Document> {
        let mut ticket = Document::new(self.document_type("Ticket")?)?;
        ticket.put("title", title)?;
        for file in files {
            let mut attachment = Document::new_embedded(
                self.document_type("Attachment")?,
                &ticket,
                "attachments",
            )?;
            attachment.put("file", *file)?;
            ticket.push_child("attachments", attachment)?;
        }
        Ok(ticket)
    }
}

impl SchemaProvider for CountingCatalogue {
    fn document_type(&self, type_name: &str) -> CopyResult<Arc<DocumentType>> {
        self.types
            .get(type_name)
            .cloned()
            .ok_or_else(|| CopyError::new(&format!("no type {}", type_name), ErrorKind::SchemaNotFound))
    }

    fn new_embedded_child(
        &self,
        type_name: &str,
        owner: &Document,
        field: &str,
    ) -> CopyResult<Document> {
        self.built.fetch_add(1, Ordering::SeqCst);
        Document::new_embedded(self.document_type(type_name)?, owner, field)
    }
}

#[test]
fn test_custom_provider_constructs_children() {
    let catalogue = Arc::new(CountingCatalogue::new().unwrap());
    let copier = DocumentCopier::builder()
        .shared_schema(catalogue.clone())
        .build()
        .unwrap();

    let source = catalogue.ticket("broken build", &["log.txt", "trace.txt"]).unwrap();
    let mut destination = catalogue.ticket("", &[]).unwrap();

    copier.copy_to(&source, &mut destination).unwrap();
    assert_eq!(catalogue.built.load(Ordering::SeqCst), 2);
    assert_eq!(destination.get("title").unwrap(), Value::from("broken build"));
    assert_eq!(destination.collection("attachments").unwrap().len(), 2);
}

#[test]
fn test_custom_identity_field_is_never_copied() {
    let catalogue = Arc::new(CountingCatalogue::new().unwrap());
    let copier = DocumentCopier::builder()
        .shared_schema(catalogue.clone())
        .build()
        .unwrap();

    let source = catalogue.ticket("a", &[]).unwrap();
    let mut destination = catalogue.ticket("b", &[]).unwrap();
    let destination_id = destination.id();

    copier
        .copy_fields_to(&source, &mut destination, &["ticket_id", "title"], CopyOptions::default())
        .unwrap();
    assert_eq!(destination.id(), destination_id);
    assert_eq!(destination.get("ticket_id").unwrap(), Value::Id(destination_id));
    assert_eq!(destination.get("title").unwrap(), Value::from("a"));

    let err = destination.put("ticket_id", 5).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
    assert_eq!(
        destination.get("_id").unwrap_err().kind(),
        &ErrorKind::UnknownField
    );
}

#[test]
fn test_empty_collection_does_not_consult_provider() {
    let catalogue = Arc::new(CountingCatalogue::new().unwrap());
    let copier = DocumentCopier::builder()
        .shared_schema(catalogue.clone())
        .build()
        .unwrap();

    let source = catalogue.ticket("a", &[]).unwrap();
    let mut destination = catalogue.ticket("b", &["kept.txt"]).unwrap();

    let summary = copier.copy_to(&source, &mut destination).unwrap();
    assert_eq!(catalogue.built.load(Ordering::SeqCst), 0);
    assert_eq!(summary.duplicated_children("attachments"), Some(0));
    assert_eq!(
        destination
            .collection("attachments")
            .unwrap()
            .first()
            .map(|a| a.get("file").unwrap()),
        Some(Value::from("kept.txt"))
    );
}
