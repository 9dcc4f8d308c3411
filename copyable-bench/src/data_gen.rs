//! Data generators for benchmarks

use copyable::attrs;
use copyable::document::Document;
use copyable::errors::CopyResult;
use copyable::schema::{DocumentType, SchemaRegistry};
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;

pub const CUSTOMER: &str = "Customer";
pub const CONTACT: &str = "Contact";
pub const REMARK: &str = "Remark";

/// Registers a customer type with ten scalar fields and two levels of
/// embedded collections.
pub fn create_registry() -> CopyResult<SchemaRegistry> {
    let registry = SchemaRegistry::new();
    registry.register(DocumentType::embedded(REMARK).field("text").build()?)?;
    registry.register(
        DocumentType::embedded(CONTACT)
            .field("email")
            .field("city")
            .field_with_default("primary", false)
            .embeds_many("remarks", REMARK)
            .build()?,
    )?;
    registry.register(
        DocumentType::builder(CUSTOMER)
            .field("first_name")
            .field("last_name")
            .field("email")
            .field("company")
            .field("street")
            .field("city")
            .field("age")
            .field("balance")
            .field_with_default("status", "active")
            .field("notes")
            .embeds_many("contacts", CONTACT)
            .build()?,
    )?;
    Ok(registry)
}

/// A customer with every scalar field set and `contacts` contacts, each with
/// two remarks.
pub fn generate_customer(registry: &SchemaRegistry, contacts: usize) -> CopyResult<Document> {
    let mut rng = rand::thread_rng();
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email: String = FreeEmail().fake();
    let company: String = CompanyName().fake();
    let street: String = StreetName().fake();
    let city: String = CityName().fake();
    let notes: String = Sentence(3..8).fake();

    let mut customer = registry.new_document_with(
        CUSTOMER,
        attrs! {
            first_name: first_name,
            last_name: last_name,
            email: email,
            company: company,
            street: street,
            city: city,
            age: rng.gen_range(18i64..80),
            balance: rng.gen_range(0.0..10_000.0),
            notes: notes,
        },
    )?;

    for index in 0..contacts {
        let email: String = FreeEmail().fake();
        let city: String = CityName().fake();
        let contact = registry.build_child_with(
            &mut customer,
            "contacts",
            attrs! { email: email, city: city, primary: index == 0 },
        )?;
        for _ in 0..2 {
            let text: String = Sentence(2..6).fake();
            registry.build_child_with(contact, "remarks", attrs! { text: text })?;
        }
    }
    Ok(customer)
}

/// A customer with only `first_name` assigned, for partial copies.
pub fn generate_sparse_customer(registry: &SchemaRegistry) -> CopyResult<Document> {
    let first_name: String = FirstName().fake();
    registry.new_document_with(CUSTOMER, attrs! { first_name: first_name })
}

pub fn generate_customers(
    registry: &SchemaRegistry,
    count: usize,
    contacts: usize,
) -> CopyResult<Vec<Document>> {
    (0..count)
        .map(|_| generate_customer(registry, contacts))
        .collect()
}
