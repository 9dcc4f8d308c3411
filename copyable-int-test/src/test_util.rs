use copyable::attrs;
use copyable::common::Value;
use copyable::copy::DocumentCopier;
use copyable::document::{Document, DocumentId};
use copyable::errors::CopyResult;
use copyable::schema::{DocumentType, SchemaRegistry};
use fake::faker::lorem::en::Word;
use fake::Fake;
use std::time::Instant;

pub const EXAMPLE: &str = "CopyableExample";
pub const CHILD: &str = "CopyableChild";
pub const CHILDREN: &str = "copyable_childs";
pub const ARCHIVED_EXAMPLE: &str = "ArchivedExample";

pub const ORDER: &str = "Order";
pub const LINE_ITEM: &str = "LineItem";
pub const NOTE: &str = "Note";

/// Runs `test` against a context produced by `before`, reporting failures
/// with their elapsed time.
pub fn run_test<T, B>(before: B, test: T)
where
    T: Fn(TestContext) -> CopyResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> CopyResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let start_time = Instant::now();
    let result = std::panic::catch_unwind(|| match before() {
        Ok(ctx) => test(ctx).map_err(|e| format!("Test failed: {:?}", e)),
        Err(e) => Err(format!("Before run failed: {:?}", e)),
    });
    let elapsed = start_time.elapsed();

    match result {
        Ok(Ok(())) => log::debug!("Test passed in {:?}", elapsed),
        Ok(Err(message)) => {
            log::error!("{}", message);
            eprintln!("\n==================== TEST FAILED ====================");
            eprintln!("Took {:?}", elapsed);
            eprintln!("{}", message);
            eprintln!("=====================================================\n");
            panic!("{}", message);
        }
        Err(panic_err) => {
            log::error!("Test panicked after {:?}", elapsed);
            eprintln!("\n=================== TEST PANICKED ===================");
            eprintln!("Took {:?}", elapsed);
            eprintln!("=====================================================\n");
            std::panic::resume_unwind(panic_err);
        }
    }
}

#[derive(Clone)]
pub struct TestContext {
    registry: SchemaRegistry,
    copier: DocumentCopier,
}

impl TestContext {
    pub fn new(registry: SchemaRegistry, copier: DocumentCopier) -> Self {
        Self { registry, copier }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn copier(&self) -> &DocumentCopier {
        &self.copier
    }

    /// `CopyableExample.new(name: 'name', address: 'address')`
    pub fn example(&self) -> CopyResult<Document> {
        self.registry
            .new_document_with(EXAMPLE, attrs! { name: "name", address: "address" })
    }

    pub fn empty_example(&self) -> CopyResult<Document> {
        self.registry.new_document(EXAMPLE)
    }

    pub fn add_child(&self, parent: &mut Document, label: &str) -> CopyResult<DocumentId> {
        let child = self
            .registry
            .build_child_with(parent, CHILDREN, attrs! { label: label })?;
        Ok(child.id())
    }
}

/// Registers the example types and builds a copier with default settings.
pub fn create_test_context() -> CopyResult<TestContext> {
    let registry = create_registry()?;
    let copier = DocumentCopier::builder().schema(registry.clone()).build()?;
    Ok(TestContext::new(registry, copier))
}

/// Like [create_test_context], with copies between different types allowed.
pub fn create_lenient_test_context() -> CopyResult<TestContext> {
    let registry = create_registry()?;
    let copier = DocumentCopier::builder()
        .schema(registry.clone())
        .require_same_type(false)
        .build()?;
    Ok(TestContext::new(registry, copier))
}

pub fn create_registry() -> CopyResult<SchemaRegistry> {
    let registry = SchemaRegistry::new();
    registry.register(DocumentType::embedded(CHILD).field("label").build()?)?;
    registry.register(
        DocumentType::builder(EXAMPLE)
            .field("name")
            .field("address")
            .embeds_many(CHILDREN, CHILD)
            .build()?,
    )?;
    registry.register(
        DocumentType::builder(ARCHIVED_EXAMPLE)
            .field("name")
            .field("address")
            .field("archived_by")
            .embeds_many(CHILDREN, CHILD)
            .build()?,
    )?;

    registry.register(DocumentType::embedded(NOTE).field("text").build()?)?;
    registry.register(
        DocumentType::embedded(LINE_ITEM)
            .field("sku")
            .field_with_default("quantity", 1)
            .embeds_many("notes", NOTE)
            .build()?,
    )?;
    registry.register(
        DocumentType::builder(ORDER)
            .field("number")
            .field_with_default("status", "draft")
            .embeds_many("lines", LINE_ITEM)
            .build()?,
    )?;
    Ok(registry)
}

/// An order with `lines` line items, each carrying `notes` notes.
pub fn create_order(ctx: &TestContext, lines: usize, notes: usize) -> CopyResult<Document> {
    let registry = ctx.registry();
    let mut order = registry.new_document_with(ORDER, attrs! { number: random_word() })?;
    for index in 0..lines {
        let line = registry.build_child_with(
            &mut order,
            "lines",
            attrs! { sku: format!("sku-{}", index), quantity: index as i64 + 1 },
        )?;
        for _ in 0..notes {
            registry.build_child_with(line, "notes", attrs! { text: random_word() })?;
        }
    }
    Ok(order)
}

/// Values of `field` across the children of collection `collection`.
pub fn child_values(document: &Document, collection: &str, field: &str) -> CopyResult<Vec<Value>> {
    document
        .collection(collection)?
        .iter()
        .map(|child| child.get(field))
        .collect()
}

pub fn random_word() -> String {
    Word().fake()
}
