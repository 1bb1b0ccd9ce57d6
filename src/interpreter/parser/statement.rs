use tracing::debug;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::{expect_block, line_of, logical_lines},
            core::{ParseResult, parse_expression},
            declaration::{parse_binding, parse_copy, parse_function, parse_struct},
            utils::{Tokens, describe, find_top_level, split_top_level},
        },
    },
};

/// Parses a whole program.
///
/// # Parameters
/// - `tokens`: The token stream produced by the lexer.
///
/// # Returns
/// The top-level statements in source order.
///
/// # Example
/// ```
/// use m87::{
///     ast::Statement,
///     interpreter::{lexer::tokenize, parser::statement::parse_program},
/// };
///
/// let tokens = tokenize("var x: number = 1\nwhile x < 3 {\n    x = x + 1\n}").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.len(), 2);
/// assert!(matches!(program[1], Statement::While { line: 2, .. }));
/// ```
pub fn parse_program(tokens: Tokens<'_>) -> ParseResult<Vec<Statement>> {
    let lines = logical_lines(tokens);
    let program = parse_lines(&lines)?;
    debug!(statements = program.len(), "parsed program");
    Ok(program)
}

/// Parses a run of logical lines, such as a program or the inside of a
/// block, into statements.
pub fn parse_lines(lines: &[Tokens<'_>]) -> ParseResult<Vec<Statement>> {
    let mut statements = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let (statement, next) = parse_statement(lines, index)?;
        statements.push(statement);
        index = next;
    }

    Ok(statements)
}

/// Parses the statement starting at logical line `index`.
///
/// The statement kind is chosen by the line's first token. Block statements
/// consume the lines of their body as well.
///
/// # Returns
/// The statement and the index of the first line after it.
///
/// # Errors
/// - `UnknownStatement` for a line starting with `else` or `in`.
/// - `UnbalancedBraces` for a `}` without an opening brace.
/// - `UnexpectedToken` for a `{` that belongs to no statement.
/// - Any error of the statement's own parser.
fn parse_statement(lines: &[Tokens<'_>], index: usize) -> ParseResult<(Statement, usize)> {
    let tokens = lines[index];
    let line = line_of(tokens);

    let statement = match &tokens[0].0 {
        Token::Return => {
            let rest = &tokens[1..];
            if rest.is_empty() {
                let details = "'return' needs a value".to_string();
                return Err(ParseError::IncompleteStatement { details, line });
            }
            Statement::Return { value: parse_expression(rest, line)?,
                                line }
        },
        Token::Let | Token::Var => parse_binding(tokens)?.into_statement(),
        Token::If => return parse_if(lines, index, &tokens[1..]),
        Token::While => return parse_while(lines, index),
        Token::For => return parse_for(lines, index),
        Token::Fn => {
            let (def, next) = parse_function(lines, index)?;
            return Ok((Statement::Function(def), next));
        },
        Token::Struct => return parse_struct(lines, index),
        Token::Copy => return parse_copy(lines, index),
        Token::RBrace => return Err(ParseError::UnbalancedBraces { line }),
        Token::LBrace => {
            return Err(ParseError::UnexpectedToken { token: "{".to_string(),
                                                     line });
        },
        Token::Else | Token::In => {
            return Err(ParseError::UnknownStatement { token: describe(tokens),
                                                      line });
        },
        _ => match find_top_level(tokens, |t| *t == Token::Equals) {
            Some(at) => parse_assignment(&tokens[..at], &tokens[at + 1..], line)?,
            None => Statement::Expression { expr: parse_expression(tokens, line)?,
                                            line },
        },
    };

    Ok((statement, index + 1))
}

/// Parses `target = value`.
///
/// An indexed target gives an index assignment; a variable or a field chain
/// gives a plain assignment.
///
/// # Errors
/// - `InvalidTarget` for any other target.
/// - `IncompleteStatement` if the value is missing.
fn parse_assignment(target: Tokens<'_>, value: Tokens<'_>, line: usize) -> ParseResult<Statement> {
    if target.is_empty() {
        return Err(ParseError::InvalidTarget { line });
    }
    if value.is_empty() {
        let details = format!("missing value for '{}'", describe(target));
        return Err(ParseError::IncompleteStatement { details, line });
    }

    let value = parse_expression(value, line)?;

    match parse_expression(target, line)? {
        Expr::ArrayIndex { array, index, .. } => Ok(Statement::IndexAssignment { array: *array,
                                                                                 index: *index,
                                                                                 value,
                                                                                 line }),
        target => match target.as_reference() {
            Some(target) => Ok(Statement::Assignment { target, value, line }),
            None => Err(ParseError::InvalidTarget { line }),
        },
    }
}

/// Parses `if cond { ... }` with optional `else { ... }` or `else if ...`.
///
/// `header` holds the condition tokens, which lets an `else if` line reuse
/// this function.
fn parse_if(lines: &[Tokens<'_>],
            index: usize,
            header: Tokens<'_>)
            -> ParseResult<(Statement, usize)> {
    let line = line_of(lines[index]);
    if header.is_empty() {
        let details = "'if' needs a condition".to_string();
        return Err(ParseError::IncompleteStatement { details, line });
    }

    let condition = parse_expression(header, line)?;
    let (open, close) = expect_block(lines, index)?;
    let then_branch = parse_lines(&lines[open + 1..close])?;

    let (else_branch, next) = match lines.get(close + 1) {
        Some([(Token::Else, _)]) => {
            let (open, close) = expect_block(lines, close + 1)?;
            (Some(parse_lines(&lines[open + 1..close])?), close + 1)
        },
        Some([(Token::Else, _), (Token::If, _), rest @ ..]) => {
            let (nested, next) = parse_if(lines, close + 1, rest)?;
            (Some(vec![nested]), next)
        },
        _ => (None, close + 1),
    };

    Ok((Statement::If { condition,
                        then_branch,
                        else_branch,
                        line },
        next))
}

/// Parses `while cond { ... }`.
fn parse_while(lines: &[Tokens<'_>], index: usize) -> ParseResult<(Statement, usize)> {
    let header = &lines[index][1..];
    let line = line_of(lines[index]);
    if header.is_empty() {
        let details = "'while' needs a condition".to_string();
        return Err(ParseError::IncompleteStatement { details, line });
    }

    let condition = parse_expression(header, line)?;
    let (open, close) = expect_block(lines, index)?;
    let body = parse_lines(&lines[open + 1..close])?;

    Ok((Statement::While { condition, body, line }, close + 1))
}

/// Parses `for a, b in xs, ys { ... }`.
///
/// # Errors
/// - `IncompleteStatement` without `in`, without names or without iterables.
/// - `UnexpectedToken` if a name is not a single identifier.
fn parse_for(lines: &[Tokens<'_>], index: usize) -> ParseResult<(Statement, usize)> {
    let header = &lines[index][1..];
    let line = line_of(lines[index]);

    let Some(at) = find_top_level(header, |t| *t == Token::In) else {
        let details = "expected 'in' in for loop".to_string();
        return Err(ParseError::IncompleteStatement { details, line });
    };
    let (names, iterables) = (&header[..at], &header[at + 1..]);
    if names.is_empty() || iterables.is_empty() {
        let details = "a for loop needs names before 'in' and values after it".to_string();
        return Err(ParseError::IncompleteStatement { details, line });
    }

    let names = split_top_level(names, &Token::Comma).into_iter()
                                                     .map(|part| loop_name(part, line))
                                                     .collect::<ParseResult<Vec<_>>>()?;
    let iterables = split_top_level(iterables, &Token::Comma).into_iter()
                                                             .map(|part| parse_expression(part, line))
                                                             .collect::<ParseResult<Vec<_>>>()?;

    let (open, close) = expect_block(lines, index)?;
    let body = parse_lines(&lines[open + 1..close])?;

    Ok((Statement::For { names,
                         iterables,
                         body,
                         line },
        close + 1))
}

fn loop_name(tokens: Tokens<'_>, line: usize) -> ParseResult<String> {
    match tokens {
        [(Token::Identifier(name), _)] => Ok(name.clone()),
        _ => Err(ParseError::UnexpectedToken { token: describe(tokens),
                                               line }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Reference, interpreter::lexer::tokenize};

    fn parse(source: &str) -> ParseResult<Vec<Statement>> {
        parse_program(&tokenize(source).unwrap())
    }

    #[test]
    fn field_chain_is_an_assignment_target() {
        let program = parse("p.a.b = 3").unwrap();

        let Statement::Assignment { target, .. } = &program[0] else {
            panic!("expected an assignment");
        };
        assert_eq!(target.root(), "p");
        assert_eq!(target.path(), vec!["a", "b"]);
        assert_ne!(*target, Reference::Variable("p".into()));
    }

    #[test]
    fn indexed_target_is_an_index_assignment() {
        let program = parse("xs[1] = 3").unwrap();
        assert!(matches!(program[0], Statement::IndexAssignment { .. }));
    }

    #[test]
    fn call_is_not_a_target() {
        assert_eq!(parse("f(1) = 3"), Err(ParseError::InvalidTarget { line: 1 }));
    }

    #[test]
    fn else_if_chains_nest() {
        let program = parse("if a {\n} else if b {\n} else {\n}").unwrap();

        let Statement::If { else_branch: Some(branch), .. } = &program[0] else {
            panic!("expected an else branch");
        };
        assert!(matches!(branch[0], Statement::If { else_branch: Some(_), .. }));
    }

    #[test]
    fn for_header_takes_several_names() {
        let program = parse("for a, b in xs, ys {\n}").unwrap();

        let Statement::For { names, iterables, .. } = &program[0] else {
            panic!("expected a for loop");
        };
        assert_eq!(names, &["a", "b"]);
        assert_eq!(iterables.len(), 2);
    }

    #[test]
    fn declaration_without_type_is_rejected() {
        assert_eq!(parse("let x = 1"),
                   Err(ParseError::MissingType { name: "x".into(),
                                                 line: 1, }));
    }

    #[test]
    fn stray_else_is_unknown() {
        assert!(matches!(parse("else {\n}"), Err(ParseError::UnknownStatement { .. })));
    }

    #[test]
    fn stray_closing_brace_is_unbalanced() {
        assert_eq!(parse("print(1)\n}"), Err(ParseError::UnbalancedBraces { line: 2 }));
    }
}
