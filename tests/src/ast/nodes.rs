use crate::utils::{assert_macro, sample_block, span};
use arbor_ast::{
    builder::Builder,
    errors::AstError,
    node::Node,
    nodes::{
        Block, IntegerLiteralExpression, MacroStatement, NodeCategory, NodeKind,
        ReferenceExpression, SourcePosition, StatementModifier, StatementModifierType,
    },
};
use pretty_assertions::assert_eq;

#[test]
fn test_kind_tags() -> anyhow::Result<()> {
    let b = Builder::new();
    assert_eq!(b.reference("x").kind(), NodeKind::ReferenceExpression);
    assert_eq!(b.integer(3).kind(), NodeKind::IntegerLiteralExpression);
    assert_eq!(assert_macro()?.kind(), NodeKind::MacroStatement);
    assert_eq!(NodeKind::MacroStatement.category(), NodeCategory::Statement);
    assert_eq!(NodeKind::StatementModifier.category(), NodeCategory::Node);
    assert_eq!(NodeKind::MacroStatement.to_string(), "MacroStatement");
    Ok(())
}

#[test]
fn test_cast_and_expect_kind() {
    let node = Node::new(IntegerLiteralExpression::new(7));
    assert_eq!(node.cast::<IntegerLiteralExpression>().map(|n| n.value()), Some(7));
    assert!(node.cast::<ReferenceExpression>().is_none());
    assert_eq!(
        node.expect_kind::<Block>().err(),
        Some(AstError::UnexpectedKind {
            expected: NodeKind::Block,
            found: NodeKind::IntegerLiteralExpression,
        })
    );
}

#[test]
fn test_new_links_prefilled_children() -> anyhow::Result<()> {
    let x = Builder::new().reference("x");
    let payload = MacroStatement::new("assert");
    payload.arguments().add(x.clone())?;
    assert!(x.parent().is_none());

    let node = Node::new(payload);
    assert!(x.is_child_of(&node));
    assert!(x.parent().is_some_and(|p| std::rc::Rc::ptr_eq(&p, &node)));
    Ok(())
}

#[test]
fn test_setter_rejects_wrong_category() -> anyhow::Result<()> {
    let node = assert_macro()?;
    let payload = node.expect_kind::<MacroStatement>()?;
    let statement = Builder::new().return_statement(None)?;

    let err = payload.set_block(Some(statement.clone())).unwrap_err();
    assert_eq!(
        err,
        AstError::IncompatibleNode {
            slot: "MacroStatement.block",
            expected: NodeCategory::Block,
            found: NodeKind::ReturnStatement,
        }
    );
    assert!(statement.parent().is_none());
    assert_eq!(payload.block().kind(), NodeKind::Block);
    Ok(())
}

#[test]
fn test_setter_moves_parent_link() -> anyhow::Result<()> {
    let b = Builder::new();
    let first = b.reference("a");
    let second = b.reference("b");
    let statement = b.expression_statement(first.clone())?;
    assert!(first.is_child_of(&statement));

    statement
        .expect_kind::<arbor_ast::nodes::ExpressionStatement>()?
        .set_expression(Some(second.clone()))?;
    assert!(first.parent().is_none());
    assert!(second.is_child_of(&statement));
    Ok(())
}

#[test]
fn test_modifier_is_a_statement_base_field() -> anyhow::Result<()> {
    let b = Builder::new();
    let statement = assert_macro()?;
    assert!(statement.modifier().is_none());

    let modifier = b.modifier(StatementModifierType::Unless, b.reference("debug"))?;
    statement.set_modifier(Some(modifier.clone()))?;
    assert!(modifier.is_child_of(&statement));
    assert_eq!(
        statement
            .modifier()
            .and_then(|m| m.cast::<StatementModifier>().map(StatementModifier::modifier_type)),
        Some(StatementModifierType::Unless)
    );

    let expression = b.reference("x");
    assert_eq!(expression.modifier().map(|m| m.kind()), None);
    assert_eq!(
        expression.set_modifier(Some(modifier)),
        Err(AstError::UnknownField {
            kind: NodeKind::ReferenceExpression,
            field: "modifier",
        })
    );
    Ok(())
}

#[test]
fn test_children_put_base_fields_first() -> anyhow::Result<()> {
    let b = Builder::new();
    let statement = b.expression_statement(b.reference("x"))?;
    statement.set_modifier(Some(b.modifier(StatementModifierType::If, b.boolean(true))?))?;

    let kinds: Vec<NodeKind> = statement.children().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::StatementModifier, NodeKind::ReferenceExpression]
    );
    Ok(())
}

#[test]
fn test_children_keep_declared_field_order() -> anyhow::Result<()> {
    let b = Builder::new();
    let statement = b.macro_statement("assert", [b.reference("x"), b.integer(1)])?;
    statement
        .expect_kind::<MacroStatement>()?
        .set_block(Some(b.block([b.return_statement(None)?])?))?;
    statement.set_modifier(Some(b.modifier(StatementModifierType::If, b.boolean(true))?))?;

    let kinds: Vec<NodeKind> = statement.children().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::StatementModifier,
            NodeKind::ReferenceExpression,
            NodeKind::IntegerLiteralExpression,
            NodeKind::Block,
        ]
    );
    Ok(())
}

#[test]
fn test_ancestors_walk_to_the_root() -> anyhow::Result<()> {
    let root = sample_block()?;
    let assert = root.children()[1].clone();
    let body = assert.expect_kind::<MacroStatement>()?.block();
    let ret = body.children()[0].clone();

    let kinds: Vec<NodeKind> = ret.ancestors().iter().map(|a| a.kind()).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Block, NodeKind::MacroStatement, NodeKind::Block]
    );
    assert!(root.ancestors().is_empty());
    Ok(())
}

#[test]
fn test_lazy_block_is_created_once_and_attached() {
    let node = Node::new(MacroStatement::new("assert"));
    let payload = node.cast::<MacroStatement>().unwrap();
    assert!(!payload.has_block());

    let block = payload.block();
    assert!(payload.has_block());
    assert!(block.is_child_of(&node));
    assert!(std::rc::Rc::ptr_eq(&block, &payload.block()));
    assert!(block.cast::<Block>().unwrap().statements().is_empty());
}

#[test]
fn test_location_and_documentation() {
    let node = Builder::at(span(4, 2, 4, 9)).reference("value");
    assert_eq!(node.location().start(), SourcePosition::new(4, 2));
    assert_eq!(node.location().to_string(), "4:2");
    assert_eq!(node.end_location(), None);
    assert_eq!(node.documentation(), None);

    node.set_end_location(Some(SourcePosition::new(4, 9)));
    node.set_documentation(Some("the value".to_string()));
    assert_eq!(node.end_location(), Some(SourcePosition::new(4, 9)));
    assert_eq!(node.documentation().as_deref(), Some("the value"));
}

#[test]
fn test_verify_parents_on_built_tree() -> anyhow::Result<()> {
    sample_block()?.verify_parents()?;
    Ok(())
}
