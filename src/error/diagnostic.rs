use crate::error::{ParseError, RuntimeError};

/// The stage of the pipeline that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Turning source text into tokens.
    Lexer,
    /// Grouping tokens into lines, blocks and statements.
    StatementParser,
    /// Disambiguating, resolving and merging expression tokens.
    ExpressionParser,
    /// Running statements.
    Evaluator,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lexer => "lexer",
            Self::StatementParser => "statement parser",
            Self::ExpressionParser => "expression parser",
            Self::Evaluator => "evaluator",
        };
        write!(f, "{name}")
    }
}

/// A flattened view of any error: which phase, which kind, which line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    /// The phase that raised the error.
    pub phase: Phase,
    /// The error kind, e.g. `"TypeMismatch"`.
    pub kind:  &'static str,
    /// The 1-based source line.
    pub line:  usize,
}

/// Any error that can abort a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The program could not be tokenized or parsed.
    Parse(ParseError),
    /// The program failed while running.
    Runtime(RuntimeError),
}

impl Error {
    /// Flattens this error into a [`Diagnostic`].
    ///
    /// # Example
    /// ```
    /// use m87::{error::Phase, run_source};
    ///
    /// let err = run_source("let x: number = \"a\"").unwrap_err();
    /// let diagnostic = err.diagnostic();
    ///
    /// assert_eq!(diagnostic.phase, Phase::Evaluator);
    /// assert_eq!(diagnostic.kind, "TypeMismatch");
    /// assert_eq!(diagnostic.line, 1);
    /// ```
    #[must_use]
    pub const fn diagnostic(&self) -> Diagnostic {
        match self {
            Self::Parse(e) => Diagnostic { phase: e.phase(),
                                           kind:  e.kind(),
                                           line:  e.line(), },
            Self::Runtime(e) => Diagnostic { phase: Phase::Evaluator,
                                             kind:  e.kind(),
                                             line:  e.line(), },
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
