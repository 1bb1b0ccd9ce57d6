use crate::{
    ast::TypeExpr,
    error::ParseError,
    interpreter::parser::{
        core::{ParseResult, parse_nodes},
        node::{Node, ParenKind},
    },
};

/// Resolves written types into [`Node::Type`].
///
/// `number`, `string`, `boolean`, `void`, `type` and `function` stand alone.
/// `array(...)` and `optional(...)` take the nodes up to their matching
/// parenthesis, which must describe exactly one type. Inside them an unknown
/// identifier names a struct.
///
/// # Errors
/// - `UnknownType` if `array`/`optional` has no argument or a bad one.
/// - `MismatchedBrackets` if the parenthesis is never closed.
pub fn resolve_types(nodes: Vec<Node>, line: usize) -> ParseResult<Vec<Node>> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut iter = nodes.into_iter().peekable();

    while let Some(node) = iter.next() {
        let Node::Identifier(name) = &node else {
            out.push(node);
            continue;
        };

        if let Some(simple) = TypeExpr::simple(name) {
            out.push(Node::Type(simple));
            continue;
        }

        if !matches!(name.as_str(), "array" | "optional") {
            out.push(node);
            continue;
        }

        if iter.next_if(|n| matches!(n, Node::LParen(_))).is_none() {
            return Err(ParseError::UnknownType { name: name.clone(),
                                                 line });
        }

        let inner = take_until_closing(&mut iter, is_open_paren, is_close_paren, line)?;
        let inner = type_from_nodes(resolve_types(inner, line)?, line)?;

        out.push(Node::Type(if name == "array" {
                                TypeExpr::Array(Box::new(inner))
                            } else {
                                TypeExpr::Optional(Box::new(inner))
                            }));
    }

    Ok(out)
}

/// Resolves `name(args)`, `create Name(args)`, `null(T)` and `id(x)`.
///
/// Arguments are split at top-level commas and each one runs through the
/// whole expression pipeline.
///
/// # Errors
/// - `MalformedExpression` for a dangling `create`, an empty argument, or a
///   pseudo-function with the wrong argument.
/// - `MismatchedBrackets` if a call is never closed.
pub fn resolve_calls(nodes: Vec<Node>, line: usize) -> ParseResult<Vec<Node>> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut iter = nodes.into_iter().peekable();
    let mut creating = false;

    while let Some(node) = iter.next() {
        match node {
            Node::CreateKeyword => {
                if creating {
                    return Err(malformed("'create' appears twice", line));
                }
                creating = true;
            },
            Node::Identifier(name)
                if matches!(iter.peek(), Some(Node::LParen(ParenKind::Call))) =>
            {
                iter.next();
                let inner = take_until_closing(&mut iter, is_open_paren, is_close_paren, line)?;
                let arguments = parse_arguments(inner, line)?;

                let call = if creating {
                    creating = false;
                    Node::StructCreate { name, arguments }
                } else {
                    match name.as_str() {
                        "null" => Node::Null(type_from_node(single(arguments, "null", line)?,
                                                            line)?),
                        "id" => identifier_from(single(arguments, "id", line)?, line)?,
                        _ => Node::Call { name, arguments },
                    }
                };
                out.push(call);
            },
            other => {
                if creating {
                    return Err(malformed("'create' must be followed by a struct name and \
                                          arguments",
                                         line));
                }
                out.push(other);
            },
        }
    }

    if creating {
        return Err(malformed("'create' must be followed by a struct name and arguments",
                             line));
    }

    Ok(out)
}

/// Resolves grouping parentheses by parsing what they enclose.
///
/// # Errors
/// - `MismatchedBrackets` for an unclosed group or a stray `)`.
/// - `MalformedExpression` for a call parenthesis with nothing to call.
pub fn resolve_groups(nodes: Vec<Node>, line: usize) -> ParseResult<Vec<Node>> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut iter = nodes.into_iter().peekable();

    while let Some(node) = iter.next() {
        match node {
            Node::LParen(ParenKind::Group) => {
                let inner = take_until_closing(&mut iter, is_open_paren, is_close_paren, line)?;
                out.push(parse_nodes(inner, line)?);
            },
            Node::LParen(ParenKind::Call) => {
                return Err(malformed("'(' does not follow anything callable", line));
            },
            Node::RParen => return Err(ParseError::MismatchedBrackets { line }),
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Resolves square brackets.
///
/// A `[` directly after an operand indexes that operand. Anywhere else it
/// starts an array literal, whose elements are split at top-level commas;
/// `[]` is an empty array.
///
/// # Errors
/// - `MismatchedBrackets` for an unclosed bracket or a stray `]`.
/// - `MalformedExpression` for an empty index or an empty element.
pub fn resolve_arrays(nodes: Vec<Node>, line: usize) -> ParseResult<Vec<Node>> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut iter = nodes.into_iter().peekable();

    while let Some(node) = iter.next() {
        match node {
            Node::LSquare => {
                let inner = take_until_closing(&mut iter, is_open_square, is_close_square, line)?;

                let indexes = out.last().is_some_and(Node::is_operand);

                if indexes && let Some(base) = out.pop() {
                    if inner.is_empty() {
                        return Err(malformed("missing index between '[' and ']'", line));
                    }
                    let index = parse_nodes(inner, line)?;
                    out.push(Node::Index { base:  Box::new(base),
                                           index: Box::new(index), });
                } else if inner.is_empty() {
                    out.push(Node::EmptyArray);
                } else {
                    out.push(Node::Array(parse_arguments(inner, line)?));
                }
            },
            Node::RSquare => return Err(ParseError::MismatchedBrackets { line }),
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Splits nodes at top-level commas and parses every part.
///
/// An empty input yields no arguments; an empty part between commas is an
/// error.
fn parse_arguments(nodes: Vec<Node>, line: usize) -> ParseResult<Vec<Node>> {
    if nodes.is_empty() {
        return Ok(Vec::new());
    }

    split_top_level(nodes).into_iter()
                          .map(|part| {
                              if part.is_empty() {
                                  Err(malformed("empty argument between commas", line))
                              } else {
                                  parse_nodes(part, line)
                              }
                          })
                          .collect()
}

/// Splits nodes at commas that are not nested in parentheses or brackets.
fn split_top_level(nodes: Vec<Node>) -> Vec<Vec<Node>> {
    let mut parts = vec![Vec::new()];
    let mut depth = 0usize;

    for node in nodes {
        match node {
            Node::LParen(_) | Node::LSquare => depth += 1,
            Node::RParen | Node::RSquare => depth = depth.saturating_sub(1),
            Node::Comma if depth == 0 => {
                parts.push(Vec::new());
                continue;
            },
            _ => {},
        }
        if let Some(part) = parts.last_mut() {
            part.push(node);
        }
    }

    parts
}

/// Consumes nodes up to the delimiter closing an already consumed opener and
/// returns the nodes in between.
fn take_until_closing<I>(iter: &mut I,
                         is_open: fn(&Node) -> bool,
                         is_close: fn(&Node) -> bool,
                         line: usize)
                         -> ParseResult<Vec<Node>>
    where I: Iterator<Item = Node>
{
    let mut inner = Vec::new();
    let mut depth = 1usize;

    for node in iter.by_ref() {
        if is_open(&node) {
            depth += 1;
        } else if is_close(&node) {
            depth -= 1;
            if depth == 0 {
                return Ok(inner);
            }
        }
        inner.push(node);
    }

    Err(ParseError::MismatchedBrackets { line })
}

fn is_open_paren(node: &Node) -> bool {
    matches!(node, Node::LParen(_))
}

fn is_close_paren(node: &Node) -> bool {
    matches!(node, Node::RParen)
}

fn is_open_square(node: &Node) -> bool {
    matches!(node, Node::LSquare)
}

fn is_close_square(node: &Node) -> bool {
    matches!(node, Node::RSquare)
}

/// Reads a resolved node as a type. A bare identifier names a struct.
fn type_from_nodes(nodes: Vec<Node>, line: usize) -> ParseResult<TypeExpr> {
    let mut iter = nodes.into_iter();
    match (iter.next(), iter.next()) {
        (Some(node), None) => type_from_node(node, line),
        (first, _) => Err(ParseError::UnknownType { name: first.map_or_else(String::new,
                                                                            |n| n.describe()),
                                                    line }),
    }
}

fn type_from_node(node: Node, line: usize) -> ParseResult<TypeExpr> {
    match node {
        Node::Type(ty) => Ok(ty),
        Node::Identifier(name) => Ok(TypeExpr::Named(name)),
        other => Err(ParseError::UnknownType { name: other.describe(),
                                               line }),
    }
}

/// Turns the argument of `id(...)` into an identifier node.
fn identifier_from(node: Node, line: usize) -> ParseResult<Node> {
    match node {
        Node::Str(name) | Node::Identifier(name) | Node::Number(name) => {
            Ok(Node::Identifier(name))
        },
        other => Err(malformed(&format!("id() cannot name {}", other.describe()), line)),
    }
}

/// Unwraps the only argument of a pseudo-function.
fn single(arguments: Vec<Node>, name: &str, line: usize) -> ParseResult<Node> {
    let mut iter = arguments.into_iter();
    match (iter.next(), iter.next()) {
        (Some(node), None) => Ok(node),
        _ => Err(malformed(&format!("{name}() takes exactly one argument"), line)),
    }
}

fn malformed(details: &str, line: usize) -> ParseError {
    ParseError::MalformedExpression { details: details.to_string(),
                                      line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Expr, interpreter::{lexer::tokenize, parser::core::parse_expression}};

    fn parse(source: &str) -> ParseResult<Expr> {
        parse_expression(&tokenize(source).unwrap(), 1)
    }

    #[test]
    fn id_names_a_string_literal() {
        let expr = parse("id(\"total\")").unwrap();
        assert_eq!(expr, Expr::Variable { name: "total".to_string(), line: 1 });
    }

    #[test]
    fn id_takes_exactly_one_argument() {
        let err = parse("id(\"a\", \"b\")").unwrap_err();
        assert!(matches!(err, ParseError::MalformedExpression { line: 1, .. }));
    }

    #[test]
    fn null_carries_its_type() {
        let expr = parse("null(array(number))").unwrap();
        assert_eq!(expr,
                   Expr::Null { of:   TypeExpr::Array(Box::new(TypeExpr::Number)),
                                line: 1, });
        assert!(parse("null()").is_err());
    }
}
