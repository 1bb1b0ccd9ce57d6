use crate::{
    ast::UnaryOperator,
    error::ParseError,
    interpreter::parser::{
        core::ParseResult,
        node::{InfixOp, Node, Operator},
    },
};

/// Level at which prefix operators are folded into their operands.
const PREFIX_LEVEL: u8 = 5;

/// Highest precedence level; only the two dots live here.
const TOP_LEVEL: u8 = 6;

/// An operand together with the prefix operators written before it.
#[derive(Debug)]
struct Term {
    prefixes: Vec<UnaryOperator>,
    node:     Node,
}

/// Folds a flat run of operands and operators into a single tree.
///
/// The run must alternate operand and infix operator, with any number of
/// prefix operators in front of each operand. Levels are merged from the
/// highest down to `0`, left to right inside a level, so every operator is
/// left-associative. Prefix operators fold at level 5: below the dots, so
/// `-a.b` negates the member, and above multiplication.
///
/// # Parameters
/// - `nodes`: Resolved nodes: operands, `Operator` nodes and nothing else.
/// - `line`: Line used for errors.
///
/// # Returns
/// The single node that remains.
///
/// # Errors
/// - `EmptyExpression` if there is nothing to merge.
/// - `MalformedExpression` for two adjacent operands or operators, a dangling
///   operator, or a leftover comma.
pub fn merge(nodes: Vec<Node>, line: usize) -> ParseResult<Node> {
    if nodes.is_empty() {
        return Err(ParseError::EmptyExpression { line });
    }

    let (terms, mut ops) = split_terms(nodes, line)?;
    let terms = merge_top_level(terms, &mut ops, line)?;

    let mut operands: Vec<Node> = terms.into_iter().map(fold_prefixes).collect();

    for level in (0..PREFIX_LEVEL).rev() {
        merge_level(&mut operands, &mut ops, level);
    }

    let mut operands = operands.into_iter();
    match (operands.next(), operands.next()) {
        (Some(node), None) if ops.is_empty() => Ok(node),
        _ => Err(malformed("operators could not be merged into one expression", line)),
    }
}

/// Separates the run into terms and the infix operators between them.
fn split_terms(nodes: Vec<Node>, line: usize) -> ParseResult<(Vec<Term>, Vec<InfixOp>)> {
    let mut terms = Vec::new();
    let mut ops = Vec::new();
    let mut prefixes = Vec::new();
    let mut expecting_operand = true;

    for node in nodes {
        match (expecting_operand, node) {
            (true, Node::Operator(Operator::Prefix(op))) => prefixes.push(op),
            (true, node) if node.is_operand() => {
                terms.push(Term { prefixes: std::mem::take(&mut prefixes),
                                  node });
                expecting_operand = false;
            },
            (false, Node::Operator(operator)) => {
                let op = match operator {
                    Operator::Binary(op) => InfixOp::Binary(op),
                    Operator::MemberDot => InfixOp::MemberDot,
                    Operator::DecimalDot => InfixOp::DecimalDot,
                    Operator::Prefix(op) => {
                        return Err(malformed(&format!("'{op}' cannot follow an operand"), line));
                    },
                };
                ops.push(op);
                expecting_operand = true;
            },
            (true, node) => {
                let details = format!("expected an operand, found '{}'", node.describe());
                return Err(ParseError::MalformedExpression { details, line });
            },
            (false, node) => {
                let details = format!("expected an operator before '{}'", node.describe());
                return Err(ParseError::MalformedExpression { details, line });
            },
        }
    }

    if expecting_operand {
        return Err(malformed("expression ends with an operator", line));
    }

    Ok((terms, ops))
}

/// Merges member and decimal dots, which bind tighter than prefixes.
///
/// The term on the right of a dot may not carry prefixes of its own; the
/// left term's prefixes move to the merged term.
fn merge_top_level(mut terms: Vec<Term>,
                   ops: &mut Vec<InfixOp>,
                   line: usize)
                   -> ParseResult<Vec<Term>> {
    let mut i = 0;
    while i < ops.len() {
        if ops[i].precedence() != TOP_LEVEL {
            i += 1;
            continue;
        }

        let op = ops.remove(i);
        let right = terms.remove(i + 1);
        if !right.prefixes.is_empty() {
            return Err(malformed("a prefix operator cannot follow '.'", line));
        }

        let left = &mut terms[i];
        let node = std::mem::replace(&mut left.node, Node::EmptyArray);
        left.node = Node::Infix { op,
                                  left: Box::new(node),
                                  right: Box::new(right.node) };
    }

    Ok(terms)
}

/// Applies a term's prefixes, the one closest to the operand first.
fn fold_prefixes(term: Term) -> Node {
    term.prefixes
        .into_iter()
        .rev()
        .fold(term.node, |operand, op| Node::Prefix { op,
                                                      operand: Box::new(operand) })
}

/// Combines every operator of one level with its two neighbours.
fn merge_level(operands: &mut Vec<Node>, ops: &mut Vec<InfixOp>, level: u8) {
    let mut i = 0;
    while i < ops.len() {
        if ops[i].precedence() != level {
            i += 1;
            continue;
        }

        let op = ops.remove(i);
        let right = operands.remove(i + 1);
        let left = std::mem::replace(&mut operands[i], Node::EmptyArray);
        operands[i] = Node::Infix { op,
                                    left: Box::new(left),
                                    right: Box::new(right) };
    }
}

fn malformed(details: &str, line: usize) -> ParseError {
    ParseError::MalformedExpression { details: details.to_string(),
                                      line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOperator;

    fn num(n: &str) -> Node {
        Node::Number(n.to_string())
    }

    fn bin(op: BinaryOperator) -> Node {
        Node::Operator(Operator::Binary(op))
    }

    #[test]
    fn multiplication_binds_before_addition() {
        let merged = merge(vec![num("2"),
                                bin(BinaryOperator::Add),
                                num("3"),
                                bin(BinaryOperator::Mul),
                                num("4")],
                           1).unwrap();

        let Node::Infix { op, right, .. } = merged else {
            panic!("expected an infix node");
        };
        assert_eq!(op, InfixOp::Binary(BinaryOperator::Add));
        assert!(matches!(*right,
                         Node::Infix { op: InfixOp::Binary(BinaryOperator::Mul), .. }));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let merged = merge(vec![num("8"),
                                bin(BinaryOperator::Sub),
                                num("3"),
                                bin(BinaryOperator::Sub),
                                num("1")],
                           1).unwrap();

        let Node::Infix { left, right, .. } = merged else {
            panic!("expected an infix node");
        };
        assert!(matches!(*left, Node::Infix { .. }));
        assert_eq!(*right, num("1"));
    }

    #[test]
    fn negation_applies_after_decimal_dot() {
        let merged = merge(vec![Node::Operator(Operator::Prefix(UnaryOperator::Negate)),
                                num("1"),
                                Node::Operator(Operator::DecimalDot),
                                num("5")],
                           1).unwrap();

        let Node::Prefix { op, operand } = merged else {
            panic!("expected a prefix node");
        };
        assert_eq!(op, UnaryOperator::Negate);
        assert!(matches!(*operand, Node::Infix { op: InfixOp::DecimalDot, .. }));
    }

    #[test]
    fn adjacent_operands_are_rejected() {
        let err = merge(vec![num("1"), num("2")], 3).unwrap_err();
        assert!(matches!(err, ParseError::MalformedExpression { line: 3, .. }));
    }

    #[test]
    fn trailing_operator_is_rejected() {
        let err = merge(vec![num("1"), bin(BinaryOperator::Add)], 1).unwrap_err();
        assert!(matches!(err, ParseError::MalformedExpression { .. }));
    }
}
