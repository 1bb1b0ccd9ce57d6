use logos::Logos;
use tracing::trace;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Integer digit runs such as `42`. A decimal point is lexed as a separate
    /// [`Token::Dot`] and joined later by the expression parser.
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Number(String),
    /// String literal tokens such as `"hello"`, stored without their quotes.
    #[regex(r#""[^"]*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// A string literal that is still open at the end of the input.
    #[regex(r#""[^"]*"#, |lex| {
        count_newlines(lex);
    }, allow_greedy = true)]
    UnterminatedString,
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `var`
    #[token("var")]
    Var,
    /// `let`
    #[token("let")]
    Let,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `while`
    #[token("while")]
    While,
    /// `struct`
    #[token("struct")]
    Struct,
    /// `copy`
    #[token("copy")]
    Copy,
    /// `create`
    #[token("create")]
    Create,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `return`
    #[token("return")]
    Return,
    /// `in`
    #[token("in")]
    In,
    /// Identifier tokens; variable, type or function names such as `x` or
    /// `number`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", |lex| {
        count_newlines(lex);
        logos::Skip
    })]
    MultiLineComment,
    /// `->`
    #[token("->")]
    Arrow,
    /// `=>`
    #[token("=>")]
    FatArrow,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `!`
    #[token("!")]
    Bang,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// Line breaks end statements.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Token::NewLine
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// The syntactic class of a token, as seen by the expression disambiguator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// A reserved word such as `let` or `create`.
    Keyword,
    /// A name.
    Identifier,
    /// A digit run.
    NumLiteral,
    /// A string literal.
    StrLiteral,
    /// `true` or `false`.
    BoolLiteral,
    /// An arithmetic, comparison, logical, range or assignment operator.
    Operator,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LSquare,
    /// `]`
    RSquare,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// A line break.
    NewLine,
    /// `=>`
    DoubleArrow,
}

impl Token {
    /// Classifies the token for disambiguation.
    ///
    /// ## Example
    /// ```
    /// use m87::interpreter::lexer::{Token, TokenClass};
    ///
    /// assert_eq!(Token::Minus.class(), TokenClass::Operator);
    /// assert_eq!(Token::Identifier("x".into()).class(), TokenClass::Identifier);
    /// assert_eq!(Token::Create.class(), TokenClass::Keyword);
    /// ```
    #[must_use]
    pub const fn class(&self) -> TokenClass {
        match self {
            Self::Number(_) => TokenClass::NumLiteral,
            Self::Str(_) | Self::UnterminatedString => TokenClass::StrLiteral,
            Self::Bool(_) => TokenClass::BoolLiteral,
            Self::Var
            | Self::Let
            | Self::If
            | Self::Else
            | Self::For
            | Self::While
            | Self::Struct
            | Self::Copy
            | Self::Create
            | Self::Fn
            | Self::Return
            | Self::In => TokenClass::Keyword,
            Self::Identifier(_) => TokenClass::Identifier,
            Self::Arrow
            | Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Slash
            | Self::Percent
            | Self::AndAnd
            | Self::OrOr
            | Self::Bang
            | Self::EqualEqual
            | Self::BangEqual
            | Self::LessEqual
            | Self::GreaterEqual
            | Self::Less
            | Self::Greater
            | Self::Equals => TokenClass::Operator,
            Self::FatArrow => TokenClass::DoubleArrow,
            Self::Dot => TokenClass::Dot,
            Self::Comma => TokenClass::Comma,
            Self::Colon => TokenClass::Colon,
            Self::Semicolon => TokenClass::Semicolon,
            Self::LParen => TokenClass::LParen,
            Self::RParen => TokenClass::RParen,
            Self::LBracket => TokenClass::LSquare,
            Self::RBracket => TokenClass::RSquare,
            Self::LBrace => TokenClass::LBrace,
            Self::RBrace => TokenClass::RBrace,
            Self::NewLine | Self::Comment | Self::MultiLineComment | Self::Ignored => {
                TokenClass::NewLine
            },
        }
    }

    /// Returns the identifier text if this token is an identifier.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Number(n) => return write!(f, "{n}"),
            Self::Str(s) => return write!(f, "\"{s}\""),
            Self::Bool(b) => return write!(f, "{b}"),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::UnterminatedString => "\"",
            Self::Var => "var",
            Self::Let => "let",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::While => "while",
            Self::Struct => "struct",
            Self::Copy => "copy",
            Self::Create => "create",
            Self::Fn => "fn",
            Self::Return => "return",
            Self::In => "in",
            Self::Arrow => "->",
            Self::FatArrow => "=>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::Bang => "!",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equals => "=",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::NewLine => "newline",
            Self::Comment | Self::MultiLineComment | Self::Ignored => "",
        };
        write!(f, "{text}")
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Tokenizes a whole source text.
///
/// Each token is paired with the line it ends on. Lines start at 1.
///
/// # Errors
/// - `UnterminatedString` if the input ends inside a string literal.
/// - `UnexpectedCharacter` for any character that begins no token.
///
/// # Example
/// ```
/// use m87::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 1 >= 2\nx").unwrap();
///
/// assert_eq!(tokens[0], (Token::Let, 1));
/// assert_eq!(tokens[4], (Token::GreaterEqual, 1));
/// assert_eq!(tokens.last(), Some(&(Token::Identifier("x".into()), 2)));
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::UnterminatedString) => {
                return Err(ParseError::UnterminatedString { line: lexer.extras.line });
            },
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(()) => {
                return Err(ParseError::UnexpectedCharacter { character: lexer.slice()
                                                                             .to_string(),
                                                             line:      lexer.extras.line, });
            },
        }
    }

    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Parses a string literal, dropping the surrounding quotes.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The text between the quotes.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    count_newlines(lex);
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(true)` if the slice is `"true"`.
/// - `Some(false)` if the slice is `"false"`.
/// - `None` otherwise.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Advances the line counter past any newlines inside the current slice.
fn count_newlines(lex: &mut logos::Lexer<Token>) {
    let newlines = lex.slice().chars().filter(|&c| c == '\n').count();
    lex.extras.line += newlines;
}
