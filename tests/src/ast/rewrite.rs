use crate::utils::{all_nodes, init_test_logging, sample_block};
use arbor_ast::{
    builder::Builder,
    errors::AstError,
    nodes::{IntegerLiteralExpression, NodeKind, ReferenceExpression},
    rewrite::replace_all,
};
use pretty_assertions::assert_eq;

fn is_reference_to(node: &arbor_ast::NodeRef, name: &str) -> bool {
    node.cast::<ReferenceExpression>()
        .is_some_and(|reference| reference.name() == name)
}

#[test]
fn test_replace_all_substitutes_every_match() -> anyhow::Result<()> {
    init_test_logging();
    let tree = sample_block()?;
    let b = Builder::new();

    let count = replace_all(&tree, |node| is_reference_to(node, "x").then(|| b.integer(0)))?;

    assert_eq!(count, 3);
    let nodes = all_nodes(&tree);
    assert!(!nodes.iter().any(|n| is_reference_to(n, "x")));
    let zeros = nodes
        .iter()
        .filter(|n| n.cast::<IntegerLiteralExpression>().is_some_and(|i| i.value() == 0))
        .count();
    assert_eq!(zeros, 3);
    tree.verify_parents()?;
    Ok(())
}

#[test]
fn test_replace_all_does_not_enter_replacements() -> anyhow::Result<()> {
    let tree = sample_block()?;
    let b = Builder::new();

    // Each replacement contains another `x`; the walk must not revisit it.
    let count = replace_all(&tree, |node| {
        if is_reference_to(node, "x") {
            b.invocation(b.reference("wrap"), [b.reference("x")]).ok()
        } else {
            None
        }
    })?;

    assert_eq!(count, 3);
    let remaining = all_nodes(&tree)
        .iter()
        .filter(|n| is_reference_to(n, "x"))
        .count();
    assert_eq!(remaining, 3);
    Ok(())
}

#[test]
fn test_replace_all_never_offers_the_root() -> anyhow::Result<()> {
    let tree = sample_block()?;
    let mut offered = Vec::new();
    let count = replace_all(&tree, |node| {
        offered.push(node.kind());
        None
    })?;
    assert_eq!(count, 0);
    assert_eq!(offered.len(), all_nodes(&tree).len() - 1);
    assert_eq!(offered.first(), Some(&NodeKind::ExpressionStatement));
    Ok(())
}

#[test]
fn test_replace_all_reports_incompatible_replacement() -> anyhow::Result<()> {
    let tree = sample_block()?;
    let b = Builder::new();

    let result = replace_all(&tree, |node| {
        (node.kind() == NodeKind::IntegerLiteralExpression)
            .then(|| b.return_statement(None).ok())
            .flatten()
    });
    assert!(matches!(
        result,
        Err(AstError::IncompatibleNode {
            found: NodeKind::ReturnStatement,
            ..
        })
    ));
    Ok(())
}
