use std::rc::Rc;

use crate::{
    ast::{BindingMode, Expr, FieldDecl, FunctionDef, Parameter, Statement, TypeExpr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::{expect_block, line_of},
            core::{ParseResult, parse_expression},
            statement::parse_lines,
            utils::{
                Tokens, describe, expect_identifier, find_top_level, matching_paren,
                parse_type, split_top_level,
            },
        },
    },
};

/// The pieces of a `let`/`var` line, shared by variables and struct fields.
#[derive(Debug)]
pub struct Binding {
    pub name:     String,
    pub mode:     BindingMode,
    pub declared: TypeExpr,
    pub value:    Option<Expr>,
    pub line:     usize,
}

impl Binding {
    /// Turns the binding into a variable declaration.
    #[must_use]
    pub fn into_statement(self) -> Statement {
        Statement::VariableDeclaration { name:     self.name,
                                         mode:     self.mode,
                                         declared: self.declared,
                                         value:    self.value,
                                         line:     self.line, }
    }

    /// Turns the binding into a struct field.
    #[must_use]
    pub fn into_field(self) -> FieldDecl {
        FieldDecl::Value { name:     self.name,
                           mode:     self.mode,
                           declared: self.declared,
                           value:    self.value,
                           line:     self.line, }
    }
}

/// Parses `let name: type [= expr]` or `var name: type [= expr]`.
///
/// An empty array literal assigned to an `array(T)` is rewritten to
/// [`Expr::EmptyArray`] so it carries its element type.
///
/// # Parameters
/// - `tokens`: One logical line starting with `let` or `var`.
///
/// # Errors
/// - `IncompleteStatement` if the name or the value after `=` is missing.
/// - `MissingType` if no `:` follows the name, or no type follows the `:`.
/// - `UnknownType` and any expression error.
///
/// # Example
/// ```
/// use m87::{
///     ast::{BindingMode, Expr, TypeExpr},
///     interpreter::{lexer::tokenize, parser::declaration::parse_binding},
/// };
///
/// let tokens = tokenize("var xs: array(number) = []").unwrap();
/// let binding = parse_binding(&tokens).unwrap();
///
/// assert_eq!(binding.mode, BindingMode::Var);
/// assert_eq!(binding.value,
///            Some(Expr::EmptyArray { element: TypeExpr::Number,
///                                    line:    1, }));
/// ```
pub fn parse_binding(tokens: Tokens<'_>) -> ParseResult<Binding> {
    let line = line_of(tokens);
    let mode = match tokens.first() {
        Some((Token::Var, _)) => BindingMode::Var,
        Some((Token::Let, _)) => BindingMode::Let,
        _ => {
            return Err(ParseError::UnknownStatement { token: describe(tokens),
                                                      line });
        },
    };

    let name = expect_identifier(tokens.get(1), "a name after let/var", line)?;

    if !matches!(tokens.get(2), Some((Token::Colon, _))) {
        return Err(ParseError::MissingType { name, line });
    }

    let rest = &tokens[3..];
    let (type_tokens, value_tokens) = match find_top_level(rest, |t| *t == Token::Equals) {
        Some(at) => (&rest[..at], Some(&rest[at + 1..])),
        None => (rest, None),
    };

    if type_tokens.is_empty() {
        return Err(ParseError::MissingType { name, line });
    }
    let declared = parse_type(type_tokens, line)?;

    let value = match value_tokens {
        Some([]) => {
            let details = format!("missing value for '{name}'");
            return Err(ParseError::IncompleteStatement { details, line });
        },
        Some(tokens) => Some(with_element_type(parse_expression(tokens, line)?, &declared)),
        None => None,
    };

    Ok(Binding { name,
                 mode,
                 declared,
                 value,
                 line })
}

/// Gives an empty array literal the element type of its declaration.
pub fn with_element_type(value: Expr, declared: &TypeExpr) -> Expr {
    match (value, declared) {
        (Expr::ArrayLiteral { elements, line }, TypeExpr::Array(element)) if elements.is_empty() => {
            Expr::EmptyArray { element: (**element).clone(),
                               line }
        },
        (value, _) => value,
    }
}

/// Parses `fn name(p: T, ...) [=> R]` followed by its block.
///
/// The return type defaults to `void`.
///
/// # Parameters
/// - `lines`: The logical lines of the enclosing body.
/// - `index`: The index of the `fn` line.
///
/// # Returns
/// The definition and the index of the line after its closing brace.
///
/// # Errors
/// - `IncompleteStatement` for a missing name, parameter list or parameter
///   type.
/// - `UnexpectedToken` for anything but `=> type` after the parameters.
/// - `NoBraceStarter`/`UnbalancedBraces` for a bad body.
pub fn parse_function(lines: &[Tokens<'_>], index: usize) -> ParseResult<(Rc<FunctionDef>, usize)> {
    let header = lines[index];
    let line = line_of(header);

    let name = expect_identifier(header.get(1), "a function name", line)?;
    if !matches!(header.get(2), Some((Token::LParen, _))) {
        let details = format!("missing parameter list for '{name}'");
        return Err(ParseError::IncompleteStatement { details, line });
    }

    let close = matching_paren(header, 2, line)?;
    let params = split_top_level(&header[3..close], &Token::Comma).into_iter()
                                                                  .map(|p| parse_parameter(p, line))
                                                                  .collect::<ParseResult<Vec<_>>>()?;

    let return_type = match &header[close + 1..] {
        [] => TypeExpr::Void,
        [(Token::FatArrow, _), ty @ ..] if !ty.is_empty() => parse_type(ty, line)?,
        [(token, line), ..] => {
            return Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                     line:  *line, });
        },
    };

    let (open, close) = expect_block(lines, index)?;
    let body = parse_lines(&lines[open + 1..close])?;

    let def = FunctionDef { name,
                            params,
                            return_type,
                            body,
                            line };
    Ok((Rc::new(def), close + 1))
}

fn parse_parameter(tokens: Tokens<'_>, line: usize) -> ParseResult<Parameter> {
    match tokens {
        [(Token::Identifier(name), _), (Token::Colon, _), ty @ ..] if !ty.is_empty() => {
            Ok(Parameter { name: name.clone(),
                           ty:   parse_type(ty, line)?, })
        },
        _ => {
            let details = format!("parameter '{}' needs the form 'name: type'", describe(tokens));
            Err(ParseError::IncompleteStatement { details, line })
        },
    }
}

/// Parses the members of a struct body: `let`/`var` fields and `fn` methods.
///
/// # Errors
/// - `UnknownStatement` for any other line.
pub fn parse_struct_body(lines: &[Tokens<'_>]) -> ParseResult<Vec<FieldDecl>> {
    let mut fields = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        match lines[index].first() {
            Some((Token::Let | Token::Var, _)) => {
                fields.push(parse_binding(lines[index])?.into_field());
                index += 1;
            },
            Some((Token::Fn, _)) => {
                let (def, next) = parse_function(lines, index)?;
                fields.push(FieldDecl::Method(def));
                index = next;
            },
            _ => {
                return Err(ParseError::UnknownStatement { token: describe(lines[index]),
                                                          line:  line_of(lines[index]), });
            },
        }
    }

    Ok(fields)
}

/// Parses `struct Name` followed by its body.
///
/// # Returns
/// The declaration and the index of the line after its closing brace.
pub fn parse_struct(lines: &[Tokens<'_>], index: usize) -> ParseResult<(Statement, usize)> {
    let header = lines[index];
    let line = line_of(header);

    let name = expect_identifier(header.get(1), "a struct name", line)?;
    if let Some((token, line)) = header.get(2) {
        return Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                 line:  *line, });
    }

    let (open, close) = expect_block(lines, index)?;
    let fields = parse_struct_body(&lines[open + 1..close])?;

    Ok((Statement::StructDeclaration { name, fields, line }, close + 1))
}

/// Returns `true` if a logical line begins an `add`, `delete` or `modify`
/// clause of a struct copy.
fn starts_clause(tokens: Tokens<'_>) -> bool {
    match tokens {
        [(Token::Identifier(word), _)] => matches!(word.as_str(), "add" | "modify"),
        [(Token::Identifier(word), _), (Token::LBracket, _), ..] => word == "delete",
        _ => false,
    }
}

/// Parses `copy New from Old` and its optional clauses.
///
/// The clauses may come in any order, on the header line or on the lines
/// after it:
///
/// ```text
/// copy Point3 from Point add {
///     var z: number = 0
/// } delete [label] modify {
///     let x: number = 1
/// }
/// ```
///
/// # Returns
/// The copy statement and the index of the first line after its clauses.
///
/// # Errors
/// - `IncompleteStatement` if `from` or a name is missing, or `delete` has
///   no bracketed list.
/// - `UnexpectedToken` for anything else after the source name.
pub fn parse_copy(lines: &[Tokens<'_>], index: usize) -> ParseResult<(Statement, usize)> {
    let header = lines[index];
    let line = line_of(header);

    let name = expect_identifier(header.get(1), "a name for the copy", line)?;
    match header.get(2) {
        Some((Token::Identifier(word), _)) if word == "from" => {},
        _ => {
            let details = "expected 'from' after the copy name".to_string();
            return Err(ParseError::IncompleteStatement { details, line });
        },
    }
    let source = expect_identifier(header.get(3), "the struct to copy", line)?;

    let mut add = Vec::new();
    let mut delete = Vec::new();
    let mut modify = Vec::new();

    let mut current = index;
    let mut clause = &header[4..];

    loop {
        if clause.is_empty() {
            match lines.get(current + 1) {
                Some(next) if starts_clause(next) => {
                    current += 1;
                    clause = next;
                },
                _ => break,
            }
        }

        match clause {
            [(Token::Identifier(word), _)] if word == "add" || word == "modify" => {
                let (open, close) = expect_block(lines, current)?;
                let fields = parse_struct_body(&lines[open + 1..close])?;
                if word == "add" {
                    add.extend(fields);
                } else {
                    modify.extend(fields);
                }
                current = close;
                clause = &[];
            },
            [(Token::Identifier(word), _), (Token::LBracket, _), rest @ ..] if word == "delete" => {
                let Some(end) = find_top_level(rest, |t| *t == Token::RBracket) else {
                    let details = "missing ']' after delete".to_string();
                    return Err(ParseError::IncompleteStatement { details, line });
                };
                for part in split_top_level(&rest[..end], &Token::Comma) {
                    let [(Token::Identifier(field), _)] = part else {
                        let details = format!("'{}' is not a field name", describe(part));
                        return Err(ParseError::IncompleteStatement { details, line });
                    };
                    delete.push(field.clone());
                }
                clause = &rest[end + 1..];
            },
            [(token, line), ..] => {
                return Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                         line:  *line, });
            },
            [] => break,
        }
    }

    Ok((Statement::StructCopy { name,
                                source,
                                add,
                                delete,
                                modify,
                                line },
        current + 1))
}
