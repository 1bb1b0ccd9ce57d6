use crate::error::Phase;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The input ended while a string literal was still open.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A character that starts no token.
    UnexpectedCharacter {
        /// The offending text.
        character: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A line starts with a keyword that cannot begin a statement.
    UnknownStatement {
        /// The leading token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `let`/`var` declaration or parameter is missing its `: type`.
    MissingType {
        /// The name being declared.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A statement is missing a required part.
    IncompleteStatement {
        /// What was missing.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A block header was not followed by `{`.
    NoBraceStarter {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An opening brace has no matching closing brace, or the reverse.
    UnbalancedBraces {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of `=` is not something that can be assigned to.
    InvalidTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found an unexpected token while parsing a statement.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A minus, dot, or parenthesis whose role could not be decided from its
    /// neighbours.
    AmbiguousToken {
        /// The token that could not be classified.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Parentheses or square brackets do not balance.
    MismatchedBrackets {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The operators and operands of an expression do not form a tree.
    MalformedExpression {
        /// Details about what was left over.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An expression was required but no tokens were given.
    EmptyExpression {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A type expression named something that is not a type.
    UnknownType {
        /// The text of the type.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A literal could not be represented.
    InvalidLiteral {
        /// The literal text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Returns the phase that raised this error.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::UnterminatedString { .. } | Self::UnexpectedCharacter { .. } => Phase::Lexer,
            Self::UnknownStatement { .. }
            | Self::MissingType { .. }
            | Self::IncompleteStatement { .. }
            | Self::NoBraceStarter { .. }
            | Self::UnbalancedBraces { .. }
            | Self::InvalidTarget { .. }
            | Self::UnexpectedToken { .. } => Phase::StatementParser,
            Self::AmbiguousToken { .. }
            | Self::MismatchedBrackets { .. }
            | Self::MalformedExpression { .. }
            | Self::EmptyExpression { .. }
            | Self::UnknownType { .. }
            | Self::InvalidLiteral { .. } => Phase::ExpressionParser,
        }
    }

    /// Returns the name of this error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnterminatedString { .. } => "UnterminatedString",
            Self::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            Self::UnknownStatement { .. } => "UnknownStatement",
            Self::MissingType { .. } => "MissingType",
            Self::IncompleteStatement { .. } => "IncompleteStatement",
            Self::NoBraceStarter { .. } => "NoBraceStarter",
            Self::UnbalancedBraces { .. } => "UnbalancedBraces",
            Self::InvalidTarget { .. } => "InvalidTarget",
            Self::UnexpectedToken { .. } => "UnexpectedToken",
            Self::AmbiguousToken { .. } => "AmbiguousToken",
            Self::MismatchedBrackets { .. } => "MismatchedBrackets",
            Self::MalformedExpression { .. } => "MalformedExpression",
            Self::EmptyExpression { .. } => "EmptyExpression",
            Self::UnknownType { .. } => "UnknownType",
            Self::InvalidLiteral { .. } => "InvalidLiteral",
        }
    }

    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedString { line }
            | Self::UnexpectedCharacter { line, .. }
            | Self::UnknownStatement { line, .. }
            | Self::MissingType { line, .. }
            | Self::IncompleteStatement { line, .. }
            | Self::NoBraceStarter { line }
            | Self::UnbalancedBraces { line }
            | Self::InvalidTarget { line }
            | Self::UnexpectedToken { line, .. }
            | Self::AmbiguousToken { line, .. }
            | Self::MismatchedBrackets { line }
            | Self::MalformedExpression { line, .. }
            | Self::EmptyExpression { line }
            | Self::UnknownType { line, .. }
            | Self::InvalidLiteral { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: String literal is never closed.")
            },
            Self::UnexpectedCharacter { character, line } => {
                write!(f, "Error on line {line}: Unexpected character: {character}.")
            },
            Self::UnknownStatement { token, line } => {
                write!(f, "Error on line {line}: Unknown statement starting with '{token}'.")
            },
            Self::MissingType { name, line } => write!(f,
                                                       "Error on line {line}: '{name}' needs a type. Example: let {name}: number = 1"),
            Self::IncompleteStatement { details, line } => {
                write!(f, "Error on line {line}: Incomplete statement: {details}.")
            },
            Self::NoBraceStarter { line } => {
                write!(f, "Error on line {line}: Expected '{{' to open a block.")
            },
            Self::UnbalancedBraces { line } => {
                write!(f, "Error on line {line}: Braces '{{' and '}}' do not match.")
            },
            Self::InvalidTarget { line } => {
                write!(f, "Error on line {line}: Left side of '=' cannot be assigned to.")
            },
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },
            Self::AmbiguousToken { token, line } => write!(f,
                                                           "Error on line {line}: Cannot tell how '{token}' is used here."),
            Self::MismatchedBrackets { line } => write!(f,
                                                        "Error on line {line}: Parentheses or brackets do not match."),
            Self::MalformedExpression { details, line } => {
                write!(f, "Error on line {line}: Malformed expression: {details}.")
            },
            Self::EmptyExpression { line } => {
                write!(f, "Error on line {line}: Expected an expression.")
            },
            Self::UnknownType { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not a type.")
            },
            Self::InvalidLiteral { text, line } => {
                write!(f, "Error on line {line}: Invalid literal: {text}.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
