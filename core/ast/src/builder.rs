//! Construction of new subtrees by rewrite passes.
//!
//! A macro expansion or desugaring pass synthesizes nodes that have no
//! source text of their own. The `Builder` stamps every node it creates with
//! one location, usually the span of the construct being expanded, so that
//! diagnostics on generated code still point somewhere useful.
//!
//! # Example
//!
//! ```
//! use arbor_ast::builder::Builder;
//! use arbor_ast::nodes::{Location, MacroStatement};
//!
//! let builder = Builder::at(Location::new(0, 14, 1, 1, 1, 15, "main.boo".to_string()));
//! let call = builder
//!     .macro_statement("assert", [builder.reference("x"), builder.integer(1)])
//!     .unwrap();
//!
//! let payload = call.cast::<MacroStatement>().unwrap();
//! assert_eq!(payload.arguments().len(), 2);
//! assert!(!payload.has_block());
//! assert_eq!(call.location().start_line, 1);
//! ```

use crate::{
    errors::AstError,
    node::{Node, NodeRef},
    nodes::{
        BinaryExpression, BinaryOperator, Block, BoolLiteralExpression, ExpressionStatement,
        IntegerLiteralExpression, Location, MacroStatement, MethodInvocationExpression, NodeData,
        ReferenceExpression, ReturnStatement, StatementModifier, StatementModifierType,
        StringLiteralExpression,
    },
};

#[derive(Debug, Clone, Default)]
pub struct Builder {
    location: Location,
}

impl Builder {
    /// A builder whose nodes carry the unknown location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn at(location: Location) -> Self {
        Self { location }
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    fn make(&self, data: impl Into<NodeData>) -> NodeRef {
        Node::with_location(data, self.location.clone())
    }

    #[must_use]
    pub fn reference(&self, name: &str) -> NodeRef {
        self.make(ReferenceExpression::new(name))
    }

    #[must_use]
    pub fn integer(&self, value: i64) -> NodeRef {
        self.make(IntegerLiteralExpression::new(value))
    }

    #[must_use]
    pub fn string(&self, value: &str) -> NodeRef {
        self.make(StringLiteralExpression::new(value))
    }

    #[must_use]
    pub fn boolean(&self, value: bool) -> NodeRef {
        self.make(BoolLiteralExpression::new(value))
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if an operand is not an expression.
    pub fn binary(
        &self,
        operator: BinaryOperator,
        left: NodeRef,
        right: NodeRef,
    ) -> Result<NodeRef, AstError> {
        let binary = BinaryExpression::new(operator);
        binary.set_left(Some(left))?;
        binary.set_right(Some(right))?;
        Ok(self.make(binary))
    }

    /// `target(arguments...)`.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if the target or an argument is
    /// not an expression.
    pub fn invocation<I>(&self, target: NodeRef, arguments: I) -> Result<NodeRef, AstError>
    where
        I: IntoIterator<Item = NodeRef>,
    {
        let invocation = MethodInvocationExpression::new();
        invocation.set_target(Some(target))?;
        invocation.arguments().extend(arguments)?;
        Ok(self.make(invocation))
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `expression` is not an expression.
    pub fn expression_statement(&self, expression: NodeRef) -> Result<NodeRef, AstError> {
        let statement = ExpressionStatement::new();
        statement.set_expression(Some(expression))?;
        Ok(self.make(statement))
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if an element is not a statement.
    pub fn block<I>(&self, statements: I) -> Result<NodeRef, AstError>
    where
        I: IntoIterator<Item = NodeRef>,
    {
        let block = Block::new();
        block.statements().extend(statements)?;
        Ok(self.make(block))
    }

    /// A macro call with the given arguments and no body yet. The body block
    /// is created on first access.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if an argument is not an expression.
    pub fn macro_statement<I>(&self, name: &str, arguments: I) -> Result<NodeRef, AstError>
    where
        I: IntoIterator<Item = NodeRef>,
    {
        let statement = MacroStatement::new(name);
        statement.arguments().extend(arguments)?;
        Ok(self.make(statement))
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `condition` is not an expression.
    pub fn modifier(
        &self,
        modifier_type: StatementModifierType,
        condition: NodeRef,
    ) -> Result<NodeRef, AstError> {
        let modifier = StatementModifier::new(modifier_type);
        modifier.set_condition(Some(condition))?;
        Ok(self.make(modifier))
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `expression` is not an expression.
    pub fn return_statement(&self, expression: Option<NodeRef>) -> Result<NodeRef, AstError> {
        let statement = ReturnStatement::new();
        statement.set_expression(expression)?;
        Ok(self.make(statement))
    }
}
