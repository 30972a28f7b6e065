use std::rc::Rc;

use crate::utils::{all_nodes, assert_macro, sample_block, span};
use arbor_ast::{
    annotations::AnnotationValue,
    builder::Builder,
    node::Node,
    nodes::{MacroStatement, ReferenceExpression, SourcePosition},
};
use pretty_assertions::assert_eq;

#[test]
fn test_clone_matches_source() -> anyhow::Result<()> {
    let tree = sample_block()?;
    let clone = tree.deep_clone();
    assert!(clone.matches(&tree));
    assert!(tree.matches(&clone));
    Ok(())
}

#[test]
fn test_clone_shares_no_nodes() -> anyhow::Result<()> {
    let tree = sample_block()?;
    let clone = tree.deep_clone();

    let originals = all_nodes(&tree);
    let copies = all_nodes(&clone);
    assert_eq!(originals.len(), copies.len());
    for copy in &copies {
        assert!(!originals.iter().any(|original| Rc::ptr_eq(original, copy)));
    }
    Ok(())
}

#[test]
fn test_clone_links_children_to_new_owners() -> anyhow::Result<()> {
    let tree = sample_block()?;
    let clone = tree.deep_clone();
    clone.verify_parents()?;
    for statement in clone.children() {
        assert!(statement.is_child_of(&clone));
        assert!(!statement.is_child_of(&tree));
    }
    Ok(())
}

#[test]
fn test_clone_of_attached_node_is_detached() -> anyhow::Result<()> {
    let tree = sample_block()?;
    let statement = tree.children()[0].clone();
    let clone = statement.deep_clone();
    assert!(statement.parent().is_some());
    assert!(clone.parent().is_none());
    Ok(())
}

#[test]
fn test_clone_copies_base_attributes() {
    let target = Builder::new().reference("decl");
    let node = Builder::at(span(2, 3, 2, 8)).reference("x");
    node.set_end_location(Some(SourcePosition::new(2, 8)));
    node.set_documentation(Some("a reference".to_string()));
    node.annotate("binding", &target);
    node.annotate("depth", 2_i64);

    let clone = node.deep_clone();
    assert_eq!(clone.location(), node.location());
    assert_eq!(clone.end_location(), Some(SourcePosition::new(2, 8)));
    assert_eq!(clone.documentation().as_deref(), Some("a reference"));
    assert_eq!(clone.annotation_keys(), vec!["binding", "depth"]);

    // Values are copied shallowly: the clone refers to the same target.
    let bound = clone.annotation("binding").and_then(|v| v.as_node());
    assert!(bound.is_some_and(|n| Rc::ptr_eq(&n, &target)));

    clone.annotate("depth", 3_i64);
    assert_eq!(node.annotation("depth"), Some(AnnotationValue::Integer(2)));
}

#[test]
fn test_clone_keeps_lazy_fields_unmaterialized() -> anyhow::Result<()> {
    let node = Node::new(MacroStatement::new("assert"));
    let clone = node.deep_clone();
    assert!(!clone.expect_kind::<MacroStatement>()?.has_block());
    assert!(!node.expect_kind::<MacroStatement>()?.has_block());

    let materialized = assert_macro()?.deep_clone();
    assert!(materialized.expect_kind::<MacroStatement>()?.has_block());
    Ok(())
}

#[test]
fn test_mutating_the_clone_leaves_the_source_alone() -> anyhow::Result<()> {
    let tree = assert_macro()?;
    let clone = tree.deep_clone();

    let payload = clone.expect_kind::<MacroStatement>()?;
    payload.set_name("require");
    payload.arguments().add(Builder::new().reference("extra"))?;
    let first_copy = payload.arguments().get(0).expect("two arguments");
    first_copy
        .expect_kind::<ReferenceExpression>()?
        .set_name("renamed");

    let original = tree.expect_kind::<MacroStatement>()?;
    assert_eq!(original.name(), "assert");
    assert_eq!(original.arguments().len(), 2);
    let first = original.arguments().get(0).and_then(|arg| {
        arg.cast::<ReferenceExpression>().map(ReferenceExpression::name)
    });
    assert_eq!(first.as_deref(), Some("x"));
    Ok(())
}
