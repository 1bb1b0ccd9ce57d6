use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, utils::Tokens},
    },
};

/// Splits a token stream into logical lines.
///
/// Lines end at newlines and semicolons, which are dropped. Every brace
/// becomes a line of its own, so `if x {` yields the lines `if x` and `{`.
/// Empty lines are skipped.
///
/// # Parameters
/// - `tokens`: The whole token stream of a program.
///
/// # Returns
/// The logical lines as slices of `tokens`.
///
/// # Example
/// ```
/// use m87::interpreter::{lexer::tokenize, parser::block::logical_lines};
///
/// let tokens = tokenize("while x { print(1); x = false }").unwrap();
/// let lines = logical_lines(&tokens);
///
/// assert_eq!(lines.len(), 5);
/// ```
pub fn logical_lines(tokens: Tokens<'_>) -> Vec<Tokens<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;

    for (i, (token, _)) in tokens.iter().enumerate() {
        match token {
            Token::NewLine | Token::Semicolon => {
                if start < i {
                    lines.push(&tokens[start..i]);
                }
                start = i + 1;
            },
            Token::LBrace | Token::RBrace => {
                if start < i {
                    lines.push(&tokens[start..i]);
                }
                lines.push(&tokens[i..=i]);
                start = i + 1;
            },
            _ => {},
        }
    }

    if start < tokens.len() {
        lines.push(&tokens[start..]);
    }

    lines
}

/// The line number of the first token of a logical line.
pub fn line_of(line: Tokens<'_>) -> usize {
    line.first().map_or(0, |(_, l)| *l)
}

/// Finds the block belonging to the header at `header`.
///
/// The `{` must be the next logical line and must sit on the header's last
/// source line or the one after it.
///
/// # Returns
/// The indices of the opening and the matching closing brace line.
///
/// # Errors
/// - `NoBraceStarter` if no brace opens the block.
/// - `UnbalancedBraces` if it is never closed.
pub fn expect_block(lines: &[Tokens<'_>], header: usize) -> ParseResult<(usize, usize)> {
    let header_line = line_of(lines[header]);
    let header_end = lines[header].last().map_or(header_line, |(_, l)| *l);
    let open = header + 1;

    match lines.get(open) {
        Some([(Token::LBrace, line)]) if *line <= header_end + 1 => {},
        _ => return Err(ParseError::NoBraceStarter { line: header_line }),
    }

    Ok((open, matching_brace(lines, open)?))
}

/// Finds the `}` line matching the `{` line at `open` by counting depth.
///
/// # Errors
/// - `UnbalancedBraces` if the end of the lines is reached first.
pub fn matching_brace(lines: &[Tokens<'_>], open: usize) -> ParseResult<usize> {
    let mut depth = 0usize;

    for (i, line) in lines.iter().enumerate().skip(open) {
        match line {
            [(Token::LBrace, _)] => depth += 1,
            [(Token::RBrace, _)] => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            },
            _ => {},
        }
    }

    Err(ParseError::UnbalancedBraces { line: line_of(lines[open]) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    #[test]
    fn brace_on_next_line_opens_block() {
        let tokens = tokenize("while x\n{\n}").unwrap();
        let lines = logical_lines(&tokens);

        assert_eq!(expect_block(&lines, 0).unwrap(), (1, 2));
    }

    #[test]
    fn brace_two_lines_down_is_rejected() {
        let tokens = tokenize("while x\n\n{\n}").unwrap();
        let lines = logical_lines(&tokens);

        assert_eq!(expect_block(&lines, 0),
                   Err(ParseError::NoBraceStarter { line: 1 }));
    }

    #[test]
    fn nested_blocks_match_outermost_brace() {
        let tokens = tokenize("if a {\nif b {\n}\n}").unwrap();
        let lines = logical_lines(&tokens);

        assert_eq!(matching_brace(&lines, 1).unwrap(), 5);
    }

    #[test]
    fn unclosed_block_is_reported() {
        let tokens = tokenize("if a {\nprint(1)").unwrap();
        let lines = logical_lines(&tokens);

        assert_eq!(matching_brace(&lines, 1),
                   Err(ParseError::UnbalancedBraces { line: 1 }));
    }
}
