use core::fmt;
use std::fmt::{Display, Formatter};

use crate::{
    collection::NodeCollection,
    fields::Field,
    node::{Node, NodeRef},
    slot::Slot,
};

/// A line/column pair inside a source file. Lines start at 1; line 0 marks
/// a position that is not known.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Display for SourcePosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Location {
    pub offset_start: u32,
    pub offset_end: u32,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub file_name: String,
}

impl Location {
    #[must_use]
    pub fn new(
        offset_start: u32,
        offset_end: u32,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
        file_name: String,
    ) -> Self {
        Self {
            offset_start,
            offset_end,
            start_line,
            start_column,
            end_line,
            end_column,
            file_name,
        }
    }

    #[must_use]
    pub fn start(&self) -> SourcePosition {
        SourcePosition::new(self.start_line, self.start_column)
    }

    #[must_use]
    pub fn end(&self) -> SourcePosition {
        SourcePosition::new(self.end_line, self.end_column)
    }

    /// Synthesized nodes carry the default location.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.start_line == 0
    }

    /// Inclusive on both ends, so a caret sitting right after the last
    /// character still belongs to the node.
    #[must_use]
    pub fn contains(&self, position: SourcePosition) -> bool {
        !self.is_unknown() && self.start() <= position && position <= self.end()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_column)
    }
}

/// The declared element type of a slot or collection.
///
/// `Statement` and `Expression` are abstract supertypes; `Block` and
/// `StatementModifier` admit exactly one kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeCategory {
    Node,
    Statement,
    Expression,
    Block,
    StatementModifier,
}

impl NodeCategory {
    #[must_use]
    pub fn accepts(self, kind: NodeKind) -> bool {
        match self {
            NodeCategory::Node => true,
            NodeCategory::Statement => kind.category() == NodeCategory::Statement,
            NodeCategory::Expression => kind.category() == NodeCategory::Expression,
            NodeCategory::Block => kind == NodeKind::Block,
            NodeCategory::StatementModifier => kind == NodeKind::StatementModifier,
        }
    }
}

impl Display for NodeCategory {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            NodeCategory::Node => write!(f, "any node"),
            NodeCategory::Statement => write!(f, "a statement"),
            NodeCategory::Expression => write!(f, "an expression"),
            NodeCategory::Block => write!(f, "a `Block`"),
            NodeCategory::StatementModifier => write!(f, "a `StatementModifier`"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum StatementModifierType {
    #[default]
    None,
    If,
    Unless,
    While,
}

impl Display for StatementModifierType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StatementModifierType::None => write!(f, ""),
            StatementModifierType::If => write!(f, "if"),
            StatementModifierType::Unless => write!(f, "unless"),
            StatementModifierType::While => write!(f, "while"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum BinaryOperator {
    #[default]
    None,
    Addition,
    Subtraction,
    Multiply,
    Division,
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    And,
    Or,
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::None => "",
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::Equality => "==",
            BinaryOperator::Inequality => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        };
        write!(f, "{symbol}")
    }
}

/// Storage type for one declared field.
macro_rules! field_storage {
    (value $ty:ty) => { ::std::cell::RefCell<$ty> };
    (list $category:ident) => { NodeCollection };
    ($group:ident $category:ident) => { Slot };
}

/// Initial, empty storage for one declared field.
macro_rules! field_default {
    (value $kind:ident $field:ident $ty:ty) => {
        ::std::cell::RefCell::new(<$ty>::default())
    };
    (list $kind:ident $field:ident $category:ident) => {
        NodeCollection::new(
            concat!(stringify!($kind), ".", stringify!($field)),
            NodeCategory::$category,
        )
    };
    ($group:ident $kind:ident $field:ident $category:ident) => {
        Slot::new(
            concat!(stringify!($kind), ".", stringify!($field)),
            NodeCategory::$category,
        )
    };
}

/// Descriptor for one declared field, tagged `true` when it is a base field.
/// Values have no descriptor.
macro_rules! field_descriptor {
    (value $field:ident, $storage:expr) => { None };
    (base $field:ident, $storage:expr) => {
        Some((true, Field::Child { name: stringify!($field), slot: $storage, lazy: false }))
    };
    (child $field:ident, $storage:expr) => {
        Some((false, Field::Child { name: stringify!($field), slot: $storage, lazy: false }))
    };
    (lazy $field:ident, $storage:expr) => {
        Some((false, Field::Child { name: stringify!($field), slot: $storage, lazy: true }))
    };
    (list $field:ident, $storage:expr) => {
        Some((false, Field::List { name: stringify!($field), list: $storage }))
    };
}

/// Whether two values of one declared field differ. Only `value` fields are
/// compared here; children are compared through their descriptors.
macro_rules! field_differs {
    (value $left:expr, $right:expr) => { *$left.borrow() != *$right.borrow() };
    ($group:ident $left:expr, $right:expr) => { false };
}

macro_rules! field_clone {
    (value $storage:expr) => { ::std::cell::RefCell::new($storage.borrow().clone()) };
    ($group:ident $storage:expr) => { $storage.deep_clone() };
}

/// Declares one node kind from its field table.
///
/// Fields keep their declared order in children, walks, clones and
/// `matches`. Each field belongs to one group:
/// - `base`: single children shared by every kind of the supertype; `replace` searches them last
/// - `value`: scalars, compared with `PartialEq` and copied with `Clone`
/// - `child`: optional single children
/// - `lazy`: single children created empty on first access
/// - `list`: ordered child collections
macro_rules! ast_node {
    (
        $(#[$outer:meta])*
        $struct_vis:vis struct $name:ident : $category:ident => $handler:ident {
            $( $group:ident $field:ident : $of:tt, )*
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug)]
        $struct_vis struct $name {
            $( pub(crate) $field: field_storage!($group $of), )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: field_default!($group $name $field $of), )*
                }
            }
        }

        impl $name {
            fn descriptors(&self) -> Vec<(bool, Field<'_>)> {
                let mut descriptors = Vec::new();
                $( descriptors.extend(field_descriptor!($group $field, &self.$field)); )*
                descriptors
            }

            pub(crate) fn base_fields(&self) -> Vec<Field<'_>> {
                self.descriptors()
                    .into_iter()
                    .filter_map(|(base, field)| base.then_some(field))
                    .collect()
            }

            pub(crate) fn fields(&self) -> Vec<Field<'_>> {
                self.descriptors()
                    .into_iter()
                    .filter_map(|(base, field)| (!base).then_some(field))
                    .collect()
            }

            // Kinds without `value` fields never read `other`.
            #[allow(unused_variables)]
            pub(crate) fn value_mismatch(&self, other: &Self) -> Option<&'static str> {
                $(
                    if field_differs!($group &self.$field, &other.$field) {
                        return Some(stringify!($field));
                    }
                )*
                None
            }

            pub(crate) fn clone_fields(&self) -> Self {
                Self {
                    $( $field: field_clone!($group &self.$field), )*
                }
            }
        }

        impl NodeType for $name {
            const KIND: NodeKind = NodeKind::$name;

            fn from_data(data: &NodeData) -> Option<&Self> {
                match data {
                    NodeData::$name(node) => Some(node),
                    _ => None,
                }
            }
        }

        impl From<$name> for NodeData {
            fn from(node: $name) -> Self {
                NodeData::$name(node)
            }
        }
    };
}

/// Declares the closed set of node kinds and everything derived from it:
/// the `NodeKind` tag, the `NodeData` sum type, the `Visitor` capability and
/// `Node::accept`.
macro_rules! ast_nodes {
    (
        $(
            $(#[$outer:meta])*
            $struct_vis:vis struct $name:ident : $category:ident => $handler:ident {
                $($fields:tt)*
            }
        )+
    ) => {
        $(
            ast_node! {
                $(#[$outer])*
                $struct_vis struct $name : $category => $handler { $($fields)* }
            }
        )+

        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub enum NodeKind {
            $( $name, )+
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$name, )+ ];

            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $( NodeKind::$name => stringify!($name), )+
                }
            }

            /// The supertype every node of this kind is assignable to.
            #[must_use]
            pub fn category(self) -> NodeCategory {
                match self {
                    $( NodeKind::$name => NodeCategory::$category, )+
                }
            }
        }

        impl Display for NodeKind {
            fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        /// Kind-specific payload of a [`Node`].
        #[derive(Debug)]
        pub enum NodeData {
            $( $name($name), )+
        }

        impl NodeData {
            #[must_use]
            pub fn kind(&self) -> NodeKind {
                match self {
                    $( NodeData::$name(_) => NodeKind::$name, )+
                }
            }

            /// A fresh payload with default values and no children.
            #[must_use]
            pub fn empty(kind: NodeKind) -> NodeData {
                match kind {
                    $( NodeKind::$name => NodeData::$name($name::default()), )+
                }
            }

            pub(crate) fn base_fields(&self) -> Vec<Field<'_>> {
                match self {
                    $( NodeData::$name(node) => node.base_fields(), )+
                }
            }

            pub(crate) fn fields(&self) -> Vec<Field<'_>> {
                match self {
                    $( NodeData::$name(node) => node.fields(), )+
                }
            }

            pub(crate) fn value_mismatch(&self, other: &NodeData) -> Option<&'static str> {
                match (self, other) {
                    $(
                        (NodeData::$name(left), NodeData::$name(right)) => {
                            left.value_mismatch(right)
                        }
                    )+
                    _ => Some("kind"),
                }
            }

            pub(crate) fn clone_fields(&self) -> NodeData {
                match self {
                    $( NodeData::$name(node) => NodeData::$name(node.clone_fields()), )+
                }
            }
        }

        /// One handler per node kind. Handlers left at their default forward
        /// to [`Visitor::unhandled`], which every visitor must spell out.
        pub trait Visitor {
            $(
                #[doc = concat!("Called by `accept` on a [`", stringify!($name), "`] node.")]
                fn $handler(&mut self, node: &NodeRef) {
                    self.unhandled(node);
                }
            )+

            fn unhandled(&mut self, node: &NodeRef);
        }

        impl Node {
            /// Dispatches this node to the visitor handler for its kind.
            pub fn accept<V: Visitor + ?Sized>(self: &::std::rc::Rc<Self>, visitor: &mut V) {
                match self.data() {
                    $( NodeData::$name(_) => visitor.$handler(self), )+
                }
            }
        }
    };
}

/// Implemented by every concrete kind; gives typed views into [`NodeData`].
pub trait NodeType: Sized + Into<NodeData> {
    const KIND: NodeKind;

    fn from_data(data: &NodeData) -> Option<&Self>;
}

ast_nodes! {

    /// An ordered sequence of statements.
    pub struct Block : Statement => on_block {
        base modifier: StatementModifier,
        list statements: Statement,
    }

    pub struct ExpressionStatement : Statement => on_expression_statement {
        base modifier: StatementModifier,
        child expression: Expression,
    }

    /// A call to a compile-time macro: `name arg1, arg2:` followed by an
    /// optional body that the macro may expand into.
    pub struct MacroStatement : Statement => on_macro_statement {
        base modifier: StatementModifier,
        value name: String,
        list arguments: Expression,
        lazy block: Block,
    }

    pub struct ReturnStatement : Statement => on_return_statement {
        base modifier: StatementModifier,
        child expression: Expression,
    }

    /// A trailing `if`/`unless`/`while` attached to a statement.
    pub struct StatementModifier : Node => on_statement_modifier {
        value modifier_type: StatementModifierType,
        child condition: Expression,
    }

    pub struct ReferenceExpression : Expression => on_reference_expression {
        value name: String,
    }

    pub struct IntegerLiteralExpression : Expression => on_integer_literal_expression {
        value value: i64,
    }

    pub struct StringLiteralExpression : Expression => on_string_literal_expression {
        value value: String,
    }

    pub struct BoolLiteralExpression : Expression => on_bool_literal_expression {
        value value: bool,
    }

    pub struct MethodInvocationExpression : Expression => on_method_invocation_expression {
        child target: Expression,
        list arguments: Expression,
    }

    pub struct BinaryExpression : Expression => on_binary_expression {
        value operator: BinaryOperator,
        child left: Expression,
        child right: Expression,
    }

}
