use crate::{
    ast::TypeExpr,
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// A borrowed run of `(Token, line)` pairs.
pub type Tokens<'a> = &'a [(Token, usize)];

/// Returns `+1` for an opening bracket of any kind, `-1` for a closing one
/// and `0` otherwise.
const fn depth_change(token: &Token) -> isize {
    match token {
        Token::LParen | Token::LBracket | Token::LBrace => 1,
        Token::RParen | Token::RBracket | Token::RBrace => -1,
        _ => 0,
    }
}

/// Finds the first token matching `pred` that is not nested inside brackets.
///
/// # Parameters
/// - `tokens`: The tokens to scan.
/// - `pred`: Test applied to every top-level token.
///
/// # Returns
/// The index of the first match, if any.
pub fn find_top_level(tokens: Tokens<'_>, pred: impl Fn(&Token) -> bool) -> Option<usize> {
    let mut depth = 0isize;
    for (i, (token, _)) in tokens.iter().enumerate() {
        if depth == 0 && pred(token) {
            return Some(i);
        }
        depth += depth_change(token);
    }
    None
}

/// Splits tokens at every top-level occurrence of `separator`.
///
/// An empty input gives no parts. Empty parts between separators are kept so
/// callers can report them.
///
/// # Example
/// ```
/// use m87::interpreter::{
///     lexer::{Token, tokenize},
///     parser::utils::split_top_level,
/// };
///
/// let tokens = tokenize("a, f(b, c), [d, e]").unwrap();
/// let parts = split_top_level(&tokens, &Token::Comma);
///
/// assert_eq!(parts.len(), 3);
/// assert_eq!(parts[1].len(), 6);
/// ```
pub fn split_top_level<'a>(tokens: Tokens<'a>, separator: &Token) -> Vec<Tokens<'a>> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut rest = tokens;
    while let Some(at) = find_top_level(rest, |t| t == separator) {
        parts.push(&rest[..at]);
        rest = &rest[at + 1..];
    }
    parts.push(rest);
    parts
}

/// Finds the parenthesis closing the one at `open`.
///
/// # Errors
/// - `IncompleteStatement` if it is never closed.
pub fn matching_paren(tokens: Tokens<'_>, open: usize, line: usize) -> ParseResult<usize> {
    let mut depth = 0usize;
    for (i, (token, _)) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            },
            _ => {},
        }
    }
    Err(ParseError::IncompleteStatement { details: "missing ')'".to_string(),
                                          line })
}

/// Parses a written type such as `number`, `array(optional(string))` or a
/// struct name.
///
/// # Errors
/// - `UnknownType` for anything that is not a single type.
///
/// # Example
/// ```
/// use m87::{
///     ast::TypeExpr,
///     interpreter::{lexer::tokenize, parser::utils::parse_type},
/// };
///
/// let tokens = tokenize("array(optional(Point))").unwrap();
/// let expected =
///     TypeExpr::Array(Box::new(TypeExpr::Optional(Box::new(TypeExpr::Named("Point".into())))));
///
/// assert_eq!(parse_type(&tokens, 1).unwrap(), expected);
/// ```
pub fn parse_type(tokens: Tokens<'_>, line: usize) -> ParseResult<TypeExpr> {
    match tokens {
        [(Token::Identifier(name), _)] if !matches!(name.as_str(), "array" | "optional") => {
            Ok(TypeExpr::simple(name).unwrap_or_else(|| TypeExpr::Named(name.clone())))
        },
        [(Token::Identifier(name), _), (Token::LParen, _), inner @ .., (Token::RParen, _)]
            if matches!(name.as_str(), "array" | "optional") =>
        {
            let inner = Box::new(parse_type(inner, line)?);
            Ok(if name == "array" {
                TypeExpr::Array(inner)
            } else {
                TypeExpr::Optional(inner)
            })
        },
        _ => Err(ParseError::UnknownType { name: describe(tokens),
                                           line }),
    }
}

/// Reads a single identifier token.
///
/// # Errors
/// - `IncompleteStatement` when the token is missing.
/// - `UnexpectedToken` when it is not an identifier.
pub fn expect_identifier(token: Option<&(Token, usize)>,
                         what: &str,
                         line: usize)
                         -> ParseResult<String> {
    match token {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, line)) => Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                                 line:  *line, }),
        None => Err(ParseError::IncompleteStatement { details: format!("expected {what}"),
                                                      line }),
    }
}

/// Joins tokens back into readable text for error messages.
pub fn describe(tokens: Tokens<'_>) -> String {
    tokens.iter()
          .map(|(token, _)| token.to_string())
          .collect::<Vec<_>>()
          .join(" ")
}
