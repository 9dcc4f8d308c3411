use copyable::common::Value;
use copyable::copy::CopyOptions;
use copyable::document::{Document, DocumentId};
use copyable_int_test::test_util::{child_values, create_order, create_test_context, run_test, ORDER};
use std::collections::HashSet;

fn collect_ids(document: &Document, ids: &mut HashSet<DocumentId>) {
    ids.insert(document.id());
    for declaration in document.doc_type().embedded_fields() {
        if let Ok(collection) = document.collection(declaration.name()) {
            for child in collection {
                collect_ids(child, ids);
            }
        }
    }
}

#[test]
fn test_nested_children_get_fresh_identities() {
    run_test(create_test_context, |ctx| {
        let source = create_order(&ctx, 3, 2)?;
        let mut destination = ctx.registry().new_document(ORDER)?;

        ctx.copier().copy_to(&source, &mut destination)?;

        let mut source_ids = HashSet::new();
        collect_ids(&source, &mut source_ids);
        let mut destination_ids = HashSet::new();
        collect_ids(&destination, &mut destination_ids);

        // root + 3 lines + 6 notes on each side
        assert_eq!(source_ids.len(), 10);
        assert_eq!(destination_ids.len(), 10);
        assert!(source_ids.is_disjoint(&destination_ids));
        Ok(())
    })
}

#[test]
fn test_nested_values_are_duplicated() {
    run_test(create_test_context, |ctx| {
        let source = create_order(&ctx, 2, 3)?;
        let mut destination = ctx.registry().new_document(ORDER)?;

        ctx.copier()
            .copy_fields_to(&source, &mut destination, &["lines"], CopyOptions::default())?;

        assert_eq!(
            child_values(&destination, "lines", "sku")?,
            child_values(&source, "lines", "sku")?
        );
        assert_eq!(
            child_values(&destination, "lines", "quantity")?,
            vec![Value::from(1i64), Value::from(2i64)]
        );

        let source_lines = source.collection("lines")?;
        let destination_lines = destination.collection("lines")?;
        for (original, copy) in source_lines.iter().zip(destination_lines) {
            assert_eq!(child_values(copy, "notes", "text")?, child_values(original, "notes", "text")?);
            for note in copy.collection("notes")? {
                assert_eq!(note.owner().map(|o| o.parent_id()), Some(copy.id()));
                assert_eq!(note.owner().map(|o| o.field().to_string()), Some("notes".to_string()));
            }
        }
        Ok(())
    })
}

#[test]
fn test_nested_copy_leaves_scalars_alone() {
    run_test(create_test_context, |ctx| {
        let source = create_order(&ctx, 1, 1)?;
        let mut destination = ctx.registry().new_document(ORDER)?;
        destination.put("number", "kept")?;

        let summary = ctx
            .copier()
            .copy_fields_to(&source, &mut destination, &["lines"], CopyOptions::default())?;
        assert_eq!(destination.get("number")?, Value::from("kept"));
        assert_eq!(destination.get("status")?, Value::from("draft"));
        assert!(summary.copied_fields().is_empty());
        assert_eq!(summary.total_duplicated(), 1);
        Ok(())
    })
}

#[test]
fn test_duplicated_child_changes_are_tracked() {
    run_test(create_test_context, |ctx| {
        let source = create_order(&ctx, 1, 0)?;
        let mut destination = ctx.registry().new_document(ORDER)?;

        ctx.copier().copy_to(&source, &mut destination)?;
        let line = destination.collection("lines")?.first().expect("line was not duplicated");
        assert!(line.is_changed("sku"));
        assert!(line.is_changed("quantity"));
        assert_eq!(line.original_value("quantity"), Some(&Value::from(1)));
        Ok(())
    })
}
