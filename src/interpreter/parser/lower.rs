use crate::{
    ast::{Expr, LiteralValue},
    error::ParseError,
    interpreter::parser::{
        core::ParseResult,
        node::{InfixOp, Node},
    },
};

/// Converts a merged node tree into an [`Expr`].
///
/// # Parameters
/// - `node`: The single node left after merging.
/// - `line`: Line attached to every produced expression.
///
/// # Returns
/// The lowered expression.
///
/// # Errors
/// - `InvalidLiteral` if a number does not fit a float.
/// - `MalformedExpression` for a dot with an unsupported right-hand side or a
///   punctuation node that survived resolution.
///
/// # Example
/// ```
/// use m87::{
///     ast::{Expr, LiteralValue},
///     interpreter::parser::{
///         lower::lower,
///         node::{InfixOp, Node},
///     },
/// };
///
/// let node = Node::Infix { op:    InfixOp::DecimalDot,
///                          left:  Box::new(Node::Number("3".into())),
///                          right: Box::new(Node::Number("05".into())), };
///
/// assert_eq!(lower(node, 1).unwrap(),
///            Expr::Literal { value: LiteralValue::Number(3.05),
///                            line:  1, });
/// ```
pub fn lower(node: Node, line: usize) -> ParseResult<Expr> {
    let expr = match node {
        Node::Number(digits) => number_literal(&digits, line)?,
        Node::Str(s) => Expr::Literal { value: LiteralValue::Str(s),
                                        line },
        Node::Bool(b) => Expr::Literal { value: LiteralValue::Bool(b),
                                         line },
        Node::Identifier(name) => Expr::Variable { name, line },
        Node::Type(ty) => Expr::TypeValue { ty, line },
        Node::Null(of) => Expr::Null { of, line },
        Node::Array(elements) => Expr::ArrayLiteral { elements: lower_all(elements, line)?,
                                                      line },
        Node::EmptyArray => Expr::ArrayLiteral { elements: Vec::new(),
                                                 line },
        Node::Call { name, arguments } => lower_call(name, arguments, line)?,
        Node::StructCreate { name, arguments } => {
            Expr::StructureRef { name,
                                 arguments: lower_all(arguments, line)?,
                                 line }
        },
        Node::Index { base, index } => Expr::ArrayIndex { array: Box::new(lower(*base, line)?),
                                                          index: Box::new(lower(*index, line)?),
                                                          line },
        Node::Infix { op: InfixOp::DecimalDot,
                      left,
                      right, } => decimal_literal(*left, *right, line)?,
        Node::Infix { op: InfixOp::MemberDot,
                      left,
                      right, } => lower_member(lower(*left, line)?, *right, line)?,
        Node::Infix { op: InfixOp::Binary(op),
                      left,
                      right, } => Expr::BinaryOp { left: Box::new(lower(*left, line)?),
                                                   op,
                                                   right: Box::new(lower(*right, line)?),
                                                   line },
        Node::Prefix { op, operand } => Expr::UnaryOp { op,
                                                        expr: Box::new(lower(*operand, line)?),
                                                        line },
        other => {
            let details = format!("unexpected '{}'", other.describe());
            return Err(ParseError::MalformedExpression { details, line });
        },
    };

    Ok(expr)
}

fn lower_all(nodes: Vec<Node>, line: usize) -> ParseResult<Vec<Expr>> {
    nodes.into_iter().map(|node| lower(node, line)).collect()
}

/// `convert(T, x)` with a written type becomes a conversion; every other call
/// keeps its name as a variable callee.
fn lower_call(name: String, mut arguments: Vec<Node>, line: usize) -> ParseResult<Expr> {
    if name == "convert"
       && arguments.len() == 2
       && let Node::Type(to) = &arguments[0]
    {
        let to = to.clone();
        let value = arguments.swap_remove(1);
        return Ok(Expr::TypeConversion { expr: Box::new(lower(value, line)?),
                                         to,
                                         line });
    }

    Ok(Expr::FunctionCall { callee: Box::new(Expr::Variable { name, line }),
                            arguments: lower_all(arguments, line)?,
                            line })
}

/// Builds the right-hand side of a member dot on top of `base`.
fn lower_member(base: Expr, member: Node, line: usize) -> ParseResult<Expr> {
    match member {
        Node::Identifier(member) => Ok(Expr::MemberAccess { base: Box::new(base),
                                                            member,
                                                            arguments: None,
                                                            line }),
        Node::Call { name, arguments } => {
            Ok(Expr::MemberAccess { base: Box::new(base),
                                    member: name,
                                    arguments: Some(lower_all(arguments, line)?),
                                    line })
        },
        Node::Index { base: indexed,
                      index, } if matches!(*indexed, Node::Identifier(_) | Node::Call { .. }) => {
            let array = lower_member(base, *indexed, line)?;
            Ok(Expr::ArrayIndex { array: Box::new(array),
                                  index: Box::new(lower(*index, line)?),
                                  line })
        },
        other => {
            let details = format!("'{}' cannot follow '.'", other.describe());
            Err(ParseError::MalformedExpression { details, line })
        },
    }
}

fn number_literal(digits: &str, line: usize) -> ParseResult<Expr> {
    let value = digits.parse::<f64>()
                      .map_err(|_| ParseError::InvalidLiteral { text: digits.to_string(),
                                                                line })?;
    Ok(Expr::Literal { value: LiteralValue::Number(value),
                       line })
}

/// Joins `int` and `frac` as written, so `1.05` keeps its leading zero.
fn decimal_literal(left: Node, right: Node, line: usize) -> ParseResult<Expr> {
    match (left, right) {
        (Node::Number(int), Node::Number(frac)) => number_literal(&format!("{int}.{frac}"), line),
        _ => {
            let details = "a decimal point must join two digit runs".to_string();
            Err(ParseError::MalformedExpression { details, line })
        },
    }
}
