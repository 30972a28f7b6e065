use crate::utils::{all_nodes, sample_block};
use arbor_ast::nodes::NodeKind;

#[test]
fn test_clear_bindings_reaches_every_node() -> anyhow::Result<()> {
    let tree = sample_block()?;
    let nodes = all_nodes(&tree);
    for (depth, node) in nodes.iter().enumerate() {
        node.annotate("visited", true);
        node.annotate("order", i64::try_from(depth)?);
    }
    assert!(nodes.iter().any(|n| n.kind() == NodeKind::StatementModifier));

    tree.clear_bindings();

    for node in &nodes {
        assert!(!node.has_annotations(), "{} kept its annotations", node.kind());
        assert!(node.annotation("visited").is_none());
    }
    Ok(())
}

#[test]
fn test_clear_bindings_inside_modifier() -> anyhow::Result<()> {
    let tree = sample_block()?;
    let statement = tree.children()[0].clone();
    let modifier = statement.modifier().expect("print has a modifier");
    let condition = modifier.children()[0].clone();
    condition.annotate("type", "bool");

    statement.clear_bindings();
    assert!(!condition.has_annotation("type"));
    Ok(())
}

#[test]
fn test_clear_bindings_is_local_to_the_subtree() -> anyhow::Result<()> {
    let tree = sample_block()?;
    tree.annotate("scope", "module");
    let statement = tree.children()[1].clone();
    statement.annotate("expanded", false);

    statement.clear_bindings();
    assert!(!statement.has_annotations());
    assert!(tree.has_annotation("scope"));
    Ok(())
}

#[test]
fn test_clearing_a_clone_keeps_the_source() -> anyhow::Result<()> {
    let tree = sample_block()?;
    tree.children()[0].annotate("type", "void");

    let template = tree.deep_clone();
    template.clear_bindings();

    assert!(!template.children()[0].has_annotations());
    assert!(tree.children()[0].has_annotation("type"));
    Ok(())
}
