use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            disambiguate::disambiguate,
            lower::lower,
            merge::merge,
            node::Node,
            resolve::{resolve_arrays, resolve_calls, resolve_groups, resolve_types},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. The tokens go through
/// disambiguation, the structural passes, precedence merging and finally
/// lowering into an [`Expr`].
///
/// # Parameters
/// - `tokens`: The `(Token, line)` pairs of one expression, without the
///   surrounding statement syntax.
/// - `line`: Line reported when `tokens` is empty.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// - `EmptyExpression` if `tokens` is empty.
/// - Any error of the individual stages.
///
/// # Example
/// ```
/// use m87::{
///     ast::{BinaryOperator, Expr},
///     interpreter::{lexer::tokenize, parser::core::parse_expression},
/// };
///
/// let tokens = tokenize("2 + 3 * 4").unwrap();
/// let expr = parse_expression(&tokens, 1).unwrap();
///
/// let Expr::BinaryOp { op, .. } = expr else { panic!() };
/// assert_eq!(op, BinaryOperator::Add);
/// ```
pub fn parse_expression(tokens: &[(Token, usize)], line: usize) -> ParseResult<Expr> {
    let Some(&(_, line)) = tokens.first() else {
        return Err(ParseError::EmptyExpression { line });
    };

    let nodes = disambiguate(tokens)?;
    let node = parse_nodes(nodes, line)?;
    lower(node, line)
}

/// Runs the structural passes and the merger over already disambiguated
/// nodes.
///
/// Bracketed sub-expressions re-enter here, so a group, an argument or an
/// index is parsed exactly like a whole expression.
pub(crate) fn parse_nodes(nodes: Vec<Node>, line: usize) -> ParseResult<Node> {
    let nodes = resolve_types(nodes, line)?;
    let nodes = resolve_calls(nodes, line)?;
    let nodes = resolve_groups(nodes, line)?;
    let nodes = resolve_arrays(nodes, line)?;
    merge(nodes, line)
}
