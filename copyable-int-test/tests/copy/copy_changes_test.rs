use copyable::common::Value;
use copyable::document::DocumentId;
use copyable::attrs;
use copyable_int_test::test_util::{create_test_context, run_test, ORDER};

#[test]
fn test_copy_changes_to_specific_fields() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        let mut b = ctx.empty_example()?;
        a.put("name", "1")?;
        a.put("address", "2")?;

        ctx.copier().copy_changes_to(&a, &mut b, &["name"])?;
        assert_eq!(b.get("name")?, Value::from("1"));
        assert!(b.get("address")?.is_null());
        Ok(())
    })
}

#[test]
fn test_copy_changes_to_all_fields() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        let mut b = ctx.empty_example()?;
        a.put("name", "1")?;
        a.put("address", "2")?;

        let summary = ctx.copier().copy_changes_to(&a, &mut b, &[])?;
        assert_eq!(b.get("name")?, Value::from("1"));
        assert_eq!(b.get("address")?, Value::from("2"));
        assert_eq!(summary.copied_fields().len(), 2);
        Ok(())
    })
}

#[test]
fn test_copy_changes_to_leaves_untouched_defaults() {
    run_test(create_test_context, |ctx| {
        let registry = ctx.registry();
        let mut a = registry.new_document(ORDER)?;
        a.put("number", "A-1")?;
        let mut b = registry.load_document(ORDER, DocumentId::new(), attrs! { status: "shipped" })?;

        ctx.copier().copy_changes_to(&a, &mut b, &[])?;
        assert_eq!(b.get("number")?, Value::from("A-1"));
        assert_eq!(b.get("status")?, Value::from("shipped"));
        Ok(())
    })
}

#[test]
fn test_copy_changes_to_after_commit_copies_nothing() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        a.commit_changes();
        let mut b = ctx.empty_example()?;

        let summary = ctx.copier().copy_changes_to(&a, &mut b, &[])?;
        assert!(summary.is_empty());
        assert!(b.get("name")?.is_null());
        Ok(())
    })
}

#[test]
fn test_copy_changes_to_filter_outside_change_set() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.empty_example()?;
        a.put("name", "only")?;
        let mut b = ctx.empty_example()?;
        b.put("address", "kept")?;

        ctx.copier().copy_changes_to(&a, &mut b, &["address"])?;
        assert!(b.get("name")?.is_null());
        assert_eq!(b.get("address")?, Value::from("kept"));
        Ok(())
    })
}
