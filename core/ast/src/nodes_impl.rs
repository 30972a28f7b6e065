use std::cell::RefCell;

use crate::{
    collection::NodeCollection,
    errors::AstError,
    node::NodeRef,
    nodes::{
        BinaryExpression, BinaryOperator, Block, BoolLiteralExpression, ExpressionStatement,
        IntegerLiteralExpression, MacroStatement, MethodInvocationExpression, NodeKind,
        ReferenceExpression, ReturnStatement, StatementModifier, StatementModifierType,
        StringLiteralExpression,
    },
};

impl Block {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn statements(&self) -> &NodeCollection {
        &self.statements
    }
}

impl ExpressionStatement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn expression(&self) -> Option<NodeRef> {
        self.expression.get()
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `expression` is not an expression.
    pub fn set_expression(&self, expression: Option<NodeRef>) -> Result<(), AstError> {
        self.expression.set(expression)
    }
}

impl MacroStatement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: RefCell::new(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.borrow_mut() = name.into();
    }

    #[must_use]
    pub fn arguments(&self) -> &NodeCollection {
        &self.arguments
    }

    /// The macro body. An empty block is created and attached on first
    /// access; use [`MacroStatement::has_block`] to look without creating one.
    #[must_use]
    pub fn block(&self) -> NodeRef {
        self.block.get_or_create(NodeKind::Block)
    }

    #[must_use]
    pub fn has_block(&self) -> bool {
        !self.block.is_empty()
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `block` is not a `Block`.
    pub fn set_block(&self, block: Option<NodeRef>) -> Result<(), AstError> {
        self.block.set(block)
    }
}

impl ReturnStatement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn expression(&self) -> Option<NodeRef> {
        self.expression.get()
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `expression` is not an expression.
    pub fn set_expression(&self, expression: Option<NodeRef>) -> Result<(), AstError> {
        self.expression.set(expression)
    }
}

impl StatementModifier {
    #[must_use]
    pub fn new(modifier_type: StatementModifierType) -> Self {
        Self {
            modifier_type: RefCell::new(modifier_type),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn modifier_type(&self) -> StatementModifierType {
        *self.modifier_type.borrow()
    }

    pub fn set_modifier_type(&self, modifier_type: StatementModifierType) {
        *self.modifier_type.borrow_mut() = modifier_type;
    }

    #[must_use]
    pub fn condition(&self) -> Option<NodeRef> {
        self.condition.get()
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `condition` is not an expression.
    pub fn set_condition(&self, condition: Option<NodeRef>) -> Result<(), AstError> {
        self.condition.set(condition)
    }
}

impl ReferenceExpression {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: RefCell::new(name.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.borrow_mut() = name.into();
    }
}

impl IntegerLiteralExpression {
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            value: RefCell::new(value),
        }
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        *self.value.borrow()
    }

    pub fn set_value(&self, value: i64) {
        *self.value.borrow_mut() = value;
    }
}

impl StringLiteralExpression {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(value.into()),
        }
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.borrow_mut() = value.into();
    }
}

impl BoolLiteralExpression {
    #[must_use]
    pub fn new(value: bool) -> Self {
        Self {
            value: RefCell::new(value),
        }
    }

    #[must_use]
    pub fn value(&self) -> bool {
        *self.value.borrow()
    }

    pub fn set_value(&self, value: bool) {
        *self.value.borrow_mut() = value;
    }
}

impl MethodInvocationExpression {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn target(&self) -> Option<NodeRef> {
        self.target.get()
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `target` is not an expression.
    pub fn set_target(&self, target: Option<NodeRef>) -> Result<(), AstError> {
        self.target.set(target)
    }

    #[must_use]
    pub fn arguments(&self) -> &NodeCollection {
        &self.arguments
    }
}

impl BinaryExpression {
    #[must_use]
    pub fn new(operator: BinaryOperator) -> Self {
        Self {
            operator: RefCell::new(operator),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn operator(&self) -> BinaryOperator {
        *self.operator.borrow()
    }

    pub fn set_operator(&self, operator: BinaryOperator) {
        *self.operator.borrow_mut() = operator;
    }

    #[must_use]
    pub fn left(&self) -> Option<NodeRef> {
        self.left.get()
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `left` is not an expression.
    pub fn set_left(&self, left: Option<NodeRef>) -> Result<(), AstError> {
        self.left.set(left)
    }

    #[must_use]
    pub fn right(&self) -> Option<NodeRef> {
        self.right.get()
    }

    /// # Errors
    ///
    /// Returns [`AstError::IncompatibleNode`] if `right` is not an expression.
    pub fn set_right(&self, right: Option<NodeRef>) -> Result<(), AstError> {
        self.right.set(right)
    }
}
