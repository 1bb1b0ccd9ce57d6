use std::rc::Rc;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constant values that can appear directly in
/// source code: numbers, strings and booleans.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit floating-point number. Integers are numbers too.
    Number(f64),
    /// A string literal, without its quotes.
    Str(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// A type as written in source code.
///
/// Builtin types are known while parsing. Any other name refers to a struct
/// and is only resolved when the program runs, by looking the name up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `number`
    Number,
    /// `string`
    String,
    /// `boolean`
    Boolean,
    /// `void`
    Void,
    /// `type`
    Type,
    /// `function`
    Function,
    /// `array(T)`
    Array(Box<Self>),
    /// `optional(T)`
    Optional(Box<Self>),
    /// A struct name.
    Named(String),
}

impl TypeExpr {
    /// Returns the builtin type spelled by a single word, if any.
    ///
    /// `array` and `optional` need an argument and are not returned here.
    ///
    /// ## Example
    /// ```
    /// use m87::ast::TypeExpr;
    ///
    /// assert_eq!(TypeExpr::simple("number"), Some(TypeExpr::Number));
    /// assert_eq!(TypeExpr::simple("array"), None);
    /// assert_eq!(TypeExpr::simple("Point"), None);
    /// ```
    #[must_use]
    pub fn simple(name: &str) -> Option<Self> {
        match name {
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            "void" => Some(Self::Void),
            "type" => Some(Self::Type),
            "function" => Some(Self::Function),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
            Self::Void => write!(f, "void"),
            Self::Type => write!(f, "type"),
            Self::Function => write!(f, "function"),
            Self::Array(inner) => write!(f, "array({inner})"),
            Self::Optional(inner) => write!(f, "optional({inner})"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Each variant models a distinct syntactic construct and carries the line it
/// was written on.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (negation or logical not).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (addition, comparison, range, ...).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An explicit null of a given type, written `null(T)`.
    Null {
        /// The type the null stands in for.
        of:   TypeExpr,
        /// Line number in the source code.
        line: usize,
    },
    /// Array literal expression.
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// An empty array whose element type is known, such as the initializer
    /// of `var xs: array(number) = []`.
    EmptyArray {
        /// The element type.
        element: TypeExpr,
        /// Line number in the source code.
        line:    usize,
    },
    /// `create Name(args)`: a fresh instance of a struct.
    StructureRef {
        /// The struct name.
        name:      String,
        /// Field initializers in declaration order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Function call expression (e.g. `length(x)`).
    FunctionCall {
        /// The expression naming the function.
        callee:    Box<Self>,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Field access or method call (`p.x`, `p.area()`).
    MemberAccess {
        /// The struct being accessed.
        base:      Box<Self>,
        /// The field name.
        member:    String,
        /// Call arguments when the member is invoked as a method.
        arguments: Option<Vec<Self>>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Array or string indexing expression (e.g., `arr[2]`).
    ArrayIndex {
        /// The array to index into.
        array: Box<Self>,
        /// The index to access.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `convert(T, expr)` with a type known while parsing.
    TypeConversion {
        /// The value to convert.
        expr: Box<Self>,
        /// The target type.
        to:   TypeExpr,
        /// Line number in the source code.
        line: usize,
    },
    /// A type used as a value, e.g. the first argument of `convert`.
    TypeValue {
        /// The type.
        ty:   TypeExpr,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use m87::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Null { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::EmptyArray { line, .. }
            | Self::StructureRef { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::MemberAccess { line, .. }
            | Self::ArrayIndex { line, .. }
            | Self::TypeConversion { line, .. }
            | Self::TypeValue { line, .. } => *line,
        }
    }

    /// Converts a plain variable or field chain into an assignment target.
    ///
    /// Returns `None` for anything else, including method calls.
    ///
    /// ## Example
    /// ```
    /// use m87::ast::{Expr, Reference};
    ///
    /// let expr = Expr::MemberAccess { base:      Box::new(Expr::Variable { name: "p".into(),
    ///                                                                      line: 1, }),
    ///                                 member:    "x".into(),
    ///                                 arguments: None,
    ///                                 line:      1, };
    ///
    /// let reference = expr.as_reference().unwrap();
    /// assert_eq!(reference.root(), "p");
    /// assert_eq!(reference.path(), vec!["x"]);
    /// ```
    #[must_use]
    pub fn as_reference(&self) -> Option<Reference> {
        match self {
            Self::Variable { name, .. } => Some(Reference::Variable(name.clone())),
            Self::MemberAccess { base,
                                 member,
                                 arguments: None,
                                 .. } => {
                Some(Reference::Member(Box::new(base.as_reference()?), member.clone()))
            },
            _ => None,
        }
    }
}

/// The target of an assignment: a variable, or a field reached through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A bare variable name.
    Variable(String),
    /// A field of another reference.
    Member(Box<Self>, String),
}

impl Reference {
    /// The variable at the start of the chain.
    #[must_use]
    pub fn root(&self) -> &str {
        match self {
            Self::Variable(name) => name,
            Self::Member(base, _) => base.root(),
        }
    }

    /// The field names after the root, outermost first.
    #[must_use]
    pub fn path(&self) -> Vec<&str> {
        match self {
            Self::Variable(_) => Vec::new(),
            Self::Member(base, field) => {
                let mut path = base.path();
                path.push(field);
                path
            },
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "{name}"),
            Self::Member(base, field) => write!(f, "{base}.{field}"),
        }
    }
}

/// Whether a binding may be reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// `let`: fixed after initialization.
    Let,
    /// `var`: may be reassigned.
    Var,
}

/// A parameter of a function declaration: `name: type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter name.
    pub name: String,
    /// The declared type.
    pub ty:   TypeExpr,
}

/// Represents a user-defined function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:        String,
    /// The parameters, in order.
    pub params:      Vec<Parameter>,
    /// The declared return type; `void` when omitted.
    pub return_type: TypeExpr,
    /// The statements executed when the function is called.
    pub body:        Vec<Statement>,
    /// Line number in the source code.
    pub line:        usize,
}

/// One member of a struct body or of a `copy` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDecl {
    /// `var name: type = expr` or `let name: type = expr`.
    Value {
        /// The field name.
        name:     String,
        /// `let` or `var`.
        mode:     BindingMode,
        /// The declared type.
        declared: TypeExpr,
        /// The initial value, if any.
        value:    Option<Expr>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `fn name(...) => type { ... }`.
    Method(Rc<FunctionDef>),
}

impl FieldDecl {
    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Value { name, .. } => name,
            Self::Method(def) => &def.name,
        }
    }
}

/// Represents a statement.
///
/// Statements are the units parsed from logical lines and blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let`/`var` declaration.
    VariableDeclaration {
        /// The name of the variable.
        name:     String,
        /// `let` or `var`.
        mode:     BindingMode,
        /// The declared type.
        declared: TypeExpr,
        /// The initial value, if any.
        value:    Option<Expr>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Assignment to a variable or a struct field.
    Assignment {
        /// What is being assigned.
        target: Reference,
        /// The value which is being assigned.
        value:  Expr,
        /// Line number in the source code.
        line:   usize,
    },
    /// `struct Name { ... }`.
    StructDeclaration {
        /// The struct name.
        name:   String,
        /// The fields and methods, in declaration order.
        fields: Vec<FieldDecl>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `copy New from Old add { ... } delete [...] modify { ... }`.
    StructCopy {
        /// The name of the new struct.
        name:   String,
        /// The template struct being copied.
        source: String,
        /// Fields added to the copy.
        add:    Vec<FieldDecl>,
        /// Fields removed from the copy.
        delete: Vec<String>,
        /// Fields replaced in the copy.
        modify: Vec<FieldDecl>,
        /// Line number in the source code.
        line:   usize,
    },
    /// A user-defined function declaration.
    Function(Rc<FunctionDef>),
    /// `xs[i] = value`.
    IndexAssignment {
        /// The array being written to.
        array: Expr,
        /// The index to write.
        index: Expr,
        /// The new element.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if cond { ... } else { ... }`.
    If {
        /// The condition.
        condition:   Expr,
        /// Statements run when the condition holds.
        then_branch: Vec<Statement>,
        /// Statements run otherwise.
        else_branch: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `while cond { ... }`.
    While {
        /// The condition checked before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Vec<Statement>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `for a, b in xs, ys { ... }`.
    For {
        /// The iterator names.
        names:     Vec<String>,
        /// The iterated expressions, one per name.
        iterables: Vec<Expr>,
        /// The loop body.
        body:      Vec<Statement>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `return expr`.
    Return {
        /// The returned value.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A standalone expression evaluated for its effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::VariableDeclaration { line, .. }
            | Self::Assignment { line, .. }
            | Self::StructDeclaration { line, .. }
            | Self::StructCopy { line, .. }
            | Self::IndexAssignment { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. }
            | Self::Return { line, .. }
            | Self::Expression { line, .. } => *line,
            Self::Function(def) => def.line,
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons, logic and ranges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
    /// Inclusive integer range (`->`)
    Range,
}

impl BinaryOperator {
    /// How tightly the operator binds; higher merges first.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Mod => 4,
            Self::Add | Self::Sub => 3,
            Self::Less
            | Self::Greater
            | Self::LessEqual
            | Self::GreaterEqual
            | Self::Equal
            | Self::NotEqual
            | Self::Range => 1,
            Self::And | Self::Or => 0,
        }
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Range, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
            Range => "->",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}
