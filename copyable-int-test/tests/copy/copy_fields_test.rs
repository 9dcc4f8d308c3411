use copyable::attrs;
use copyable::common::Value;
use copyable::copy::{copy_nil_source, overwrite_nil_only, CopyOptions, SkipReason};
use copyable::document::Document;
use copyable::errors::CopyResult;
use copyable_int_test::test_util::{
    child_values, create_lenient_test_context, create_test_context, run_test, TestContext,
    ARCHIVED_EXAMPLE, CHILDREN, EXAMPLE,
};

fn example_with_address(ctx: &TestContext, address: &str) -> CopyResult<Document> {
    ctx.registry()
        .new_document_with(EXAMPLE, attrs! { address: address })
}

#[test]
fn test_copy_fields_to_when_no_existing_values() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        let a_child = ctx.add_child(&mut a, "a")?;
        let mut b = ctx.empty_example()?;

        ctx.copier()
            .copy_fields_to(&a, &mut b, &["address", CHILDREN], CopyOptions::default())?;

        assert_eq!(b.get("address")?, a.get("address")?);
        assert!(b.get("name")?.is_null());
        let b_child = b.collection(CHILDREN)?.first().expect("child was not duplicated");
        assert_eq!(b_child.get("label")?, Value::from("a"));
        assert_ne!(b_child.id().to_string(), a_child.to_string());
        Ok(())
    })
}

#[test]
fn test_copy_fields_to_overwrite_nil_only() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        ctx.add_child(&mut a, "a")?;
        let mut b = example_with_address(&ctx, "1")?;

        ctx.copier()
            .copy_fields_to(&a, &mut b, &["address", CHILDREN], overwrite_nil_only())?;

        assert_eq!(b.get("address")?, Value::from("1"));
        assert_eq!(child_values(&b, CHILDREN, "label")?, vec![Value::from("a")]);
        Ok(())
    })
}

#[test]
fn test_copy_fields_to_overwrite_nil_only_fills_gaps() {
    run_test(create_test_context, |ctx| {
        let a = ctx.example()?;
        let mut b = example_with_address(&ctx, "1")?;

        let summary = ctx
            .copier()
            .copy_fields_to(&a, &mut b, &["name", "address"], overwrite_nil_only())?;

        assert_eq!(b.get("name")?, Value::from("name"));
        assert_eq!(b.get("address")?, Value::from("1"));
        assert!(summary.was_copied("name"));
        assert_eq!(summary.skip_reason("address"), Some(SkipReason::DestinationPresent));
        Ok(())
    })
}

#[test]
fn test_copy_fields_to_ignore_nil_source_when_true() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        let mut b = ctx.empty_example()?;
        a.put("address", ())?;
        b.put("address", "test")?;

        ctx.copier()
            .copy_fields_to(&a, &mut b, &["address"], CopyOptions::default())?;
        assert_eq!(b.get("address")?, Value::from("test"));
        Ok(())
    })
}

#[test]
fn test_copy_fields_to_ignore_nil_source_when_false() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        let mut b = ctx.empty_example()?;
        a.put("address", ())?;
        b.put("address", "test")?;

        ctx.copier().copy_fields_to(
            &a,
            &mut b,
            &["address"],
            CopyOptions::default().with_ignore_nil_source(false),
        )?;
        assert!(b.get("address")?.is_null());
        Ok(())
    })
}

#[test]
fn test_overwrite_nil_only_is_checked_before_ignore_nil_source() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        let mut b = ctx.empty_example()?;
        a.put("address", ())?;
        b.put("address", "test")?;

        let summary = ctx.copier().copy_fields_to(
            &a,
            &mut b,
            &["address"],
            CopyOptions::new(true, false),
        )?;
        assert_eq!(b.get("address")?, Value::from("test"));
        assert_eq!(summary.skip_reason("address"), Some(SkipReason::DestinationPresent));
        Ok(())
    })
}

#[test]
fn test_copy_fields_to_collections_ignore_options() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        ctx.add_child(&mut a, "a")?;
        let mut b = ctx.empty_example()?;
        ctx.add_child(&mut b, "b")?;

        for options in [CopyOptions::default(), overwrite_nil_only(), copy_nil_source()] {
            ctx.copier().copy_fields_to(&a, &mut b, &[CHILDREN], options)?;
        }
        assert_eq!(
            child_values(&b, CHILDREN, "label")?,
            vec![
                Value::from("b"),
                Value::from("a"),
                Value::from("a"),
                Value::from("a"),
            ]
        );
        Ok(())
    })
}

#[test]
fn test_copy_fields_to_order_insensitive() {
    run_test(create_test_context, |ctx| {
        let a = ctx.example()?;
        let mut first = ctx.empty_example()?;
        let mut second = ctx.empty_example()?;

        let one = ctx.copier().copy_fields_to(
            &a,
            &mut first,
            &["address", "name", "address"],
            CopyOptions::default(),
        )?;
        let two = ctx
            .copier()
            .copy_fields_to(&a, &mut second, &["name", "address"], CopyOptions::default())?;

        assert_eq!(first.values(), second.values());
        assert_eq!(one, two);
        assert_eq!(one.copied_fields(), &["name".to_string(), "address".to_string()]);
        Ok(())
    })
}

#[test]
fn test_copy_fields_to_identity_is_ignored() {
    run_test(create_test_context, |ctx| {
        let a = ctx.example()?;
        let mut b = ctx.empty_example()?;
        let b_id = b.id();

        let summary = ctx
            .copier()
            .copy_fields_to(&a, &mut b, &["_id"], CopyOptions::default())?;
        assert_eq!(b.id(), b_id);
        assert!(summary.is_empty());
        Ok(())
    })
}

#[test]
fn test_copy_fields_with_defaults() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        a.put("address", ())?;
        let mut b = example_with_address(&ctx, "kept")?;

        ctx.copier()
            .copy_fields_with_defaults(&a, &mut b, &["name", "address"])?;
        assert_eq!(b.get("name")?, Value::from("name"));
        assert_eq!(b.get("address")?, Value::from("kept"));
        Ok(())
    })
}

#[test]
fn test_copy_fields_between_types() {
    run_test(create_lenient_test_context, |ctx| {
        let mut a = ctx.example()?;
        ctx.add_child(&mut a, "a")?;
        let mut b = ctx.registry().new_document(ARCHIVED_EXAMPLE)?;

        ctx.copier()
            .copy_fields_to(&a, &mut b, &["name", CHILDREN], CopyOptions::default())?;
        assert_eq!(b.get("name")?, Value::from("name"));
        assert!(b.get("address")?.is_null());
        assert_eq!(child_values(&b, CHILDREN, "label")?, vec![Value::from("a")]);
        Ok(())
    })
}
