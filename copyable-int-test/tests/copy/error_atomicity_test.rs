use copyable::common::Value;
use copyable::copy::CopyOptions;
use copyable::errors::ErrorKind;
use copyable::schema::DocumentType;
use copyable_int_test::test_util::{
    create_lenient_test_context, create_test_context, run_test, CHILDREN, ORDER,
};

#[test]
fn test_unknown_field_leaves_destination_unchanged() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        ctx.add_child(&mut a, "a")?;
        let mut b = ctx.empty_example()?;

        let result = ctx.copier().copy_fields_to(
            &a,
            &mut b,
            &["name", CHILDREN, "zip_code"],
            CopyOptions::default(),
        );
        let err = result.expect_err("unknown field was accepted");
        assert_eq!(err.kind(), &ErrorKind::UnknownField);
        assert!(err.message().contains("zip_code"));

        assert!(b.get("name")?.is_null());
        assert!(b.collection(CHILDREN)?.is_empty());
        assert!(!b.has_changes());
        Ok(())
    })
}

#[test]
fn test_unknown_filter_in_copy_changes_to() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        a.put("name", "1")?;
        let mut b = ctx.empty_example()?;

        let err = ctx
            .copier()
            .copy_changes_to(&a, &mut b, &["name", "nickname"])
            .expect_err("unknown field was accepted");
        assert_eq!(err.kind(), &ErrorKind::UnknownField);
        assert!(b.get("name")?.is_null());
        Ok(())
    })
}

#[test]
fn test_type_mismatch_is_rejected() {
    run_test(create_test_context, |ctx| {
        let a = ctx.example()?;
        let mut order = ctx.registry().new_document(ORDER)?;

        let err = ctx
            .copier()
            .copy_to(&a, &mut order)
            .expect_err("copy between types was accepted");
        assert_eq!(err.kind(), &ErrorKind::TypeMismatch);
        assert!(!order.has_changes());
        Ok(())
    })
}

#[test]
fn test_lenient_copy_requires_shared_fields() {
    run_test(create_lenient_test_context, |ctx| {
        let a = ctx.example()?;
        let mut order = ctx.registry().new_document(ORDER)?;

        let err = ctx
            .copier()
            .copy_to(&a, &mut order)
            .expect_err("copy into undeclared fields was accepted");
        assert_eq!(err.kind(), &ErrorKind::UnknownField);
        assert_eq!(order.get("status")?, Value::from("draft"));
        Ok(())
    })
}

#[test]
fn test_lenient_copy_rejects_kind_mismatch() {
    run_test(create_lenient_test_context, |ctx| {
        ctx.registry().register(
            DocumentType::builder("FlatExample")
                .field("name")
                .field(CHILDREN)
                .build()?,
        )?;
        let mut a = ctx.example()?;
        ctx.add_child(&mut a, "a")?;
        let mut flat = ctx.registry().new_document("FlatExample")?;

        let err = ctx
            .copier()
            .copy_fields_to(&a, &mut flat, &["name", CHILDREN], CopyOptions::default())
            .expect_err("collection copied into a scalar");
        assert_eq!(err.kind(), &ErrorKind::FieldKindMismatch);
        assert!(flat.get("name")?.is_null());
        assert!(!flat.has_changes());
        Ok(())
    })
}

#[test]
fn test_identity_cannot_be_assigned() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        let err = a.put("_id", 1).expect_err("identity was assigned");
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
        Ok(())
    })
}
