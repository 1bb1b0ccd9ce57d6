use crate::ast::{BinaryOperator, TypeExpr, UnaryOperator};

/// Which kind of group a left parenthesis opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenKind {
    /// `f(` or `array(`: the parenthesis belongs to the name before it.
    Call,
    /// `(`: a grouping parenthesis.
    Group,
}

/// An operator whose role has been decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// An infix operator.
    Binary(BinaryOperator),
    /// A prefix operator.
    Prefix(UnaryOperator),
    /// `a.b`
    MemberDot,
    /// `1.5`
    DecimalDot,
}

/// The operator joining the two sides of an [`Node::Infix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    /// An arithmetic, comparison, logical or range operator.
    Binary(BinaryOperator),
    /// Member access.
    MemberDot,
    /// Decimal point between two digit runs.
    DecimalDot,
}

impl InfixOp {
    /// How tightly the operator binds; higher merges first.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::MemberDot | Self::DecimalDot => 6,
            Self::Binary(op) => op.precedence(),
        }
    }
}

/// A node of the expression pipeline.
///
/// Disambiguation produces the leaf and punctuation variants; resolution and
/// merging replace runs of them with the composite variants until a single
/// node remains.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A digit run, kept as text so a decimal point can join two of them.
    Number(String),
    /// A string literal.
    Str(String),
    /// A boolean literal.
    Bool(bool),
    /// A name.
    Identifier(String),
    /// The `create` keyword, waiting for its struct call.
    CreateKeyword,
    /// An operator with its role decided.
    Operator(Operator),
    /// `(`
    LParen(ParenKind),
    /// `)`
    RParen,
    /// `[`
    LSquare,
    /// `]`
    RSquare,
    /// `,`
    Comma,
    /// A resolved type such as `array(number)`.
    Type(TypeExpr),
    /// `null(T)`
    Null(TypeExpr),
    /// `[a, b]`
    Array(Vec<Self>),
    /// `[]`
    EmptyArray,
    /// `name(args)`
    Call {
        /// The function name.
        name:      String,
        /// One resolved node per argument.
        arguments: Vec<Self>,
    },
    /// `create Name(args)`
    StructCreate {
        /// The struct name.
        name:      String,
        /// One resolved node per argument.
        arguments: Vec<Self>,
    },
    /// `base[index]`
    Index {
        /// The indexed operand.
        base:  Box<Self>,
        /// The index expression.
        index: Box<Self>,
    },
    /// Two operands joined by an infix operator.
    Infix {
        /// The operator.
        op:    InfixOp,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// An operand with a prefix operator applied.
    Prefix {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
    },
}

impl Node {
    /// Returns `true` for nodes that stand for a complete value.
    #[must_use]
    pub const fn is_operand(&self) -> bool {
        matches!(self,
                 Self::Number(_)
                 | Self::Str(_)
                 | Self::Bool(_)
                 | Self::Identifier(_)
                 | Self::Type(_)
                 | Self::Null(_)
                 | Self::Array(_)
                 | Self::EmptyArray
                 | Self::Call { .. }
                 | Self::StructCreate { .. }
                 | Self::Index { .. }
                 | Self::Infix { .. }
                 | Self::Prefix { .. })
    }

    /// A short description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => n.clone(),
            Self::Str(s) => format!("\"{s}\""),
            Self::Bool(b) => b.to_string(),
            Self::Identifier(name) => name.clone(),
            Self::CreateKeyword | Self::StructCreate { .. } => "create".to_string(),
            Self::Operator(Operator::Binary(op)) => op.to_string(),
            Self::Operator(Operator::Prefix(op)) => op.to_string(),
            Self::Operator(Operator::MemberDot | Operator::DecimalDot) => ".".to_string(),
            Self::LParen(_) => "(".to_string(),
            Self::RParen => ")".to_string(),
            Self::LSquare => "[".to_string(),
            Self::RSquare => "]".to_string(),
            Self::Comma => ",".to_string(),
            Self::Type(ty) | Self::Null(ty) => ty.to_string(),
            Self::Array(_) | Self::EmptyArray => "array".to_string(),
            Self::Call { name, .. } => format!("{name}(...)"),
            Self::Index { .. } => "index".to_string(),
            Self::Infix { .. } | Self::Prefix { .. } => "expression".to_string(),
        }
    }
}
