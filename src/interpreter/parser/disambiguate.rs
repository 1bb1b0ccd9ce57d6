use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenClass},
        parser::{
            core::ParseResult,
            node::{Node, Operator, ParenKind},
        },
    },
};

/// Turns an expression's tokens into pipeline nodes.
///
/// Most tokens map one to one. Three are context sensitive and are decided
/// here from their neighbours:
///
/// - `-` is a prefix negation at the start, after an operator, or after `(`,
///   `[` or `,`, and a subtraction after a literal, an identifier, `)` or
///   `]`. Directly after `&&`, `||` or `!` it is rejected.
/// - `.` is a member access between two identifiers and a decimal point
///   between two digit runs, at most once per number.
/// - `(` opens a call after an identifier or keyword, and a group at the
///   start, after an operator, or after `(`, `[` or `,`.
///
/// # Parameters
/// - `tokens`: The `(Token, line)` pairs of one expression.
///
/// # Returns
/// One node per token.
///
/// # Errors
/// - `AmbiguousToken` when a minus, dot or parenthesis fits none of the rules.
/// - `MalformedExpression` for tokens that cannot appear in an expression.
///
/// # Example
/// ```
/// use m87::{
///     ast::{BinaryOperator, UnaryOperator},
///     interpreter::{
///         lexer::tokenize,
///         parser::{
///             disambiguate::disambiguate,
///             node::{Node, Operator},
///         },
///     },
/// };
///
/// let tokens = tokenize("-1 - 2").unwrap();
/// let nodes = disambiguate(&tokens).unwrap();
///
/// assert_eq!(nodes[0], Node::Operator(Operator::Prefix(UnaryOperator::Negate)));
/// assert_eq!(nodes[2], Node::Operator(Operator::Binary(BinaryOperator::Sub)));
/// ```
pub fn disambiguate(tokens: &[(Token, usize)]) -> ParseResult<Vec<Node>> {
    let mut nodes = Vec::with_capacity(tokens.len());
    let mut decimal_used = false;

    for (index, (token, line)) in tokens.iter().enumerate() {
        let previous = index.checked_sub(1).map(|i| &tokens[i].0);
        let next = tokens.get(index + 1).map(|(t, _)| t);

        let node = match token {
            Token::Minus => classify_minus(previous, *line)?,
            Token::Dot => {
                let operator = classify_dot(previous, next, decimal_used, *line)?;
                if operator == Operator::DecimalDot {
                    decimal_used = true;
                }
                Node::Operator(operator)
            },
            Token::LParen => Node::LParen(classify_paren(previous, *line)?),
            Token::Number(digits) => Node::Number(digits.clone()),
            Token::Str(s) => Node::Str(s.clone()),
            Token::Bool(b) => Node::Bool(*b),
            Token::Identifier(name) => Node::Identifier(name.clone()),
            Token::Create => Node::CreateKeyword,
            Token::Bang => Node::Operator(Operator::Prefix(UnaryOperator::Not)),
            Token::RParen => Node::RParen,
            Token::LBracket => Node::LSquare,
            Token::RBracket => Node::RSquare,
            Token::Comma => Node::Comma,
            other => match binary_operator(other) {
                Some(op) => Node::Operator(Operator::Binary(op)),
                None => {
                    let details = format!("'{other}' cannot appear in an expression");
                    return Err(ParseError::MalformedExpression { details,
                                                                 line: *line });
                },
            },
        };

        if !matches!(token, Token::Number(_) | Token::Dot) {
            decimal_used = false;
        }

        nodes.push(node);
    }

    Ok(nodes)
}

/// Maps an infix operator token to its operator.
const fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::Plus => BinaryOperator::Add,
        Token::Star => BinaryOperator::Mul,
        Token::Slash => BinaryOperator::Div,
        Token::Percent => BinaryOperator::Mod,
        Token::EqualEqual => BinaryOperator::Equal,
        Token::BangEqual => BinaryOperator::NotEqual,
        Token::Less => BinaryOperator::Less,
        Token::Greater => BinaryOperator::Greater,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        Token::AndAnd => BinaryOperator::And,
        Token::OrOr => BinaryOperator::Or,
        Token::Arrow => BinaryOperator::Range,
        _ => return None,
    };
    Some(op)
}

/// Returns `true` if a token leaves the parser expecting an operand, as a
/// bracket or separator does.
const fn opens_operand(class: TokenClass) -> bool {
    matches!(class, TokenClass::LParen | TokenClass::LSquare | TokenClass::Comma)
}

/// Decides whether a minus negates or subtracts.
fn classify_minus(previous: Option<&Token>, line: usize) -> ParseResult<Node> {
    let Some(previous) = previous else {
        return Ok(Node::Operator(Operator::Prefix(UnaryOperator::Negate)));
    };

    if matches!(previous, Token::AndAnd | Token::OrOr | Token::Bang) {
        return Err(ParseError::AmbiguousToken { token: "-".to_string(),
                                                line });
    }

    match previous.class() {
        TokenClass::Operator => Ok(Node::Operator(Operator::Prefix(UnaryOperator::Negate))),
        class if opens_operand(class) => {
            Ok(Node::Operator(Operator::Prefix(UnaryOperator::Negate)))
        },
        TokenClass::NumLiteral
        | TokenClass::StrLiteral
        | TokenClass::BoolLiteral
        | TokenClass::Identifier
        | TokenClass::RParen
        | TokenClass::RSquare => Ok(Node::Operator(Operator::Binary(BinaryOperator::Sub))),
        _ => Err(ParseError::AmbiguousToken { token: "-".to_string(),
                                              line }),
    }
}

/// Decides whether a dot accesses a member or is a decimal point.
fn classify_dot(previous: Option<&Token>,
                next: Option<&Token>,
                decimal_used: bool,
                line: usize)
                -> ParseResult<Operator> {
    match (previous.map(Token::class), next.map(Token::class)) {
        (Some(TokenClass::Identifier), Some(TokenClass::Identifier)) => Ok(Operator::MemberDot),
        (Some(TokenClass::NumLiteral), Some(TokenClass::NumLiteral)) if !decimal_used => {
            Ok(Operator::DecimalDot)
        },
        _ => Err(ParseError::AmbiguousToken { token: ".".to_string(),
                                              line }),
    }
}

/// Decides whether a left parenthesis opens a call or a group.
fn classify_paren(previous: Option<&Token>, line: usize) -> ParseResult<ParenKind> {
    let Some(previous) = previous else {
        return Ok(ParenKind::Group);
    };

    match previous.class() {
        TokenClass::Identifier | TokenClass::Keyword => Ok(ParenKind::Call),
        TokenClass::Operator => Ok(ParenKind::Group),
        class if opens_operand(class) => Ok(ParenKind::Group),
        _ => Err(ParseError::AmbiguousToken { token: "(".to_string(),
                                              line }),
    }
}
