use copyable::common::Value;
use copyable_int_test::test_util::{child_values, create_test_context, run_test, CHILDREN};

#[test]
fn test_copy_to_copies_fields() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        let a_child = ctx.add_child(&mut a, "a")?;
        let mut b = ctx.empty_example()?;

        ctx.copier().copy_to(&a, &mut b)?;
        assert_eq!(b.get("name")?, a.get("name")?);
        assert_eq!(b.get("address")?, a.get("address")?);

        let b_child = b.collection(CHILDREN)?.first().expect("child was not duplicated");
        assert_eq!(b_child.get("label")?, Value::from("a"));
        assert_ne!(b_child.id(), a_child);
        Ok(())
    })
}

#[test]
fn test_copy_to_does_not_copy_id() {
    run_test(create_test_context, |ctx| {
        let a = ctx.example()?;
        let mut b = ctx.empty_example()?;
        let b_id = b.id();

        ctx.copier().copy_to(&a, &mut b)?;
        assert_ne!(b.id(), a.id());
        assert_eq!(b.id(), b_id);
        assert_eq!(b.get("_id")?, Value::Id(b_id));
        Ok(())
    })
}

#[test]
fn test_copy_to_twice_appends_twice() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        ctx.add_child(&mut a, "a")?;
        ctx.add_child(&mut a, "b")?;
        let mut b = ctx.empty_example()?;

        ctx.copier().copy_to(&a, &mut b)?;
        let scalars = b.values();
        let summary = ctx.copier().copy_to(&a, &mut b)?;

        assert_eq!(b.values(), scalars);
        assert_eq!(summary.duplicated_children(CHILDREN), Some(2));
        assert_eq!(
            child_values(&b, CHILDREN, "label")?,
            vec![
                Value::from("a"),
                Value::from("b"),
                Value::from("a"),
                Value::from("b"),
            ]
        );

        let mut ids = b.collection(CHILDREN)?.ids();
        ids.extend(a.collection(CHILDREN)?.ids());
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
        Ok(())
    })
}

#[test]
fn test_copy_to_keeps_existing_children() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        ctx.add_child(&mut a, "from a")?;
        let mut b = ctx.empty_example()?;
        let existing = ctx.add_child(&mut b, "from b")?;

        ctx.copier().copy_to(&a, &mut b)?;
        let children = b.collection(CHILDREN)?;
        assert_eq!(children.len(), 2);
        assert_eq!(children.first().map(|c| c.id()), Some(existing));
        assert_eq!(
            child_values(&b, CHILDREN, "label")?,
            vec![Value::from("from b"), Value::from("from a")]
        );
        Ok(())
    })
}

#[test]
fn test_copy_to_leaves_source_untouched() {
    run_test(create_test_context, |ctx| {
        let mut a = ctx.example()?;
        let a_child = ctx.add_child(&mut a, "a")?;
        let before = a.values();
        let mut b = ctx.empty_example()?;

        ctx.copier().copy_to(&a, &mut b)?;
        assert_eq!(a.values(), before);
        assert_eq!(a.collection(CHILDREN)?.ids(), vec![a_child]);
        Ok(())
    })
}

#[test]
fn test_copy_to_with_empty_collection() {
    run_test(create_test_context, |ctx| {
        let a = ctx.example()?;
        let mut b = ctx.empty_example()?;

        let summary = ctx.copier().copy_to(&a, &mut b)?;
        assert_eq!(summary.duplicated_children(CHILDREN), Some(0));
        assert!(b.collection(CHILDREN)?.is_empty());
        Ok(())
    })
}
