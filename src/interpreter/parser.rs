/// Core expression parsing entry point.
///
/// Runs a token slice through disambiguation, structural resolution,
/// precedence merging and lowering, and defines the parser result type.
pub mod core;

/// Intermediate nodes.
///
/// The tagged union shared by every stage of the expression pipeline before
/// it is lowered into the AST.
pub mod node;

/// Context-sensitive token classification.
///
/// Decides whether each minus is unary or binary, each dot is a member access
/// or a decimal point, and each left parenthesis opens a call or a group.
pub mod disambiguate;

/// Bracketed construct resolution.
///
/// Rewrites type expressions, calls, struct creation, groups, array literals
/// and index accesses into single composite nodes.
pub mod resolve;

/// Operator precedence merging.
///
/// Folds a flat run of operands and operators into a tree, binding the
/// highest precedence first.
pub mod merge;

/// Lowering of merged nodes.
///
/// Converts the merged node tree into [`Expr`](crate::ast::Expr).
pub mod lower;

/// Statement parsing.
///
/// Dispatches each logical line on its leading keyword and assembles the
/// statement list of a program or block.
pub mod statement;

/// Logical lines and blocks.
///
/// Splits the token stream into lines and finds the braces that delimit
/// nested bodies.
pub mod block;

/// Declarations.
///
/// Parses `let`/`var`, `fn`, `struct` and `copy`.
pub mod declaration;

/// Parser utility functions.
///
/// Helpers for splitting token slices at top-level separators and parsing
/// written types.
pub mod utils;
