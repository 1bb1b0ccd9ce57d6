#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// A value had an unexpected or incompatible type.
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division or modulo by zero.
    DivideByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Read a variable or field that was declared without a value.
    UninitializedValue {
        /// The name of the variable or field.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to reassign a `let` binding.
    MutatedLet {
        /// The name of the binding.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to mutate something that has no rebindable storage, such as a
    /// template struct.
    MutatedNonBindable {
        /// The name of the value.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Used a name that is not bound in any enclosing scope.
    NotDefined {
        /// The name that was looked up.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied.
    ArgumentCountMismatch {
        /// The number of arguments expected.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to access an element outside an array or string.
    IndexOutOfRange {
        /// The index that was requested.
        index:  i64,
        /// The length of the indexed value.
        length: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// The run took more evaluation steps than allowed.
    StepLimitExceeded {
        /// The configured step ceiling.
        limit: usize,
        /// The source line being executed when the ceiling was hit.
        line:  usize,
    },
    /// Any other failure, with a custom message.
    General {
        /// Details about the failure.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Returns the name of this error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::DivideByZero { .. } => "DivideByZero",
            Self::UninitializedValue { .. } => "UninitializedValue",
            Self::MutatedLet { .. } => "MutatedLet",
            Self::MutatedNonBindable { .. } => "MutatedNonBindable",
            Self::NotDefined { .. } => "NotDefined",
            Self::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            Self::IndexOutOfRange { .. } => "IndexOutOfRange",
            Self::StepLimitExceeded { .. } => "StepLimitExceeded",
            Self::General { .. } => "General",
        }
    }

    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::TypeMismatch { line, .. }
            | Self::DivideByZero { line }
            | Self::UninitializedValue { line, .. }
            | Self::MutatedLet { line, .. }
            | Self::MutatedNonBindable { line, .. }
            | Self::NotDefined { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::IndexOutOfRange { line, .. }
            | Self::StepLimitExceeded { line, .. }
            | Self::General { line, .. } => *line,
        }
    }

    /// Shorthand for a [`RuntimeError::TypeMismatch`].
    pub(crate) fn mismatch(details: impl Into<String>, line: usize) -> Self {
        Self::TypeMismatch { details: details.into(),
                             line }
    }

    /// Shorthand for a [`RuntimeError::General`].
    pub(crate) fn general(message: impl Into<String>, line: usize) -> Self {
        Self::General { message: message.into(),
                        line }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { details, line } => {
                write!(f, "Error on line {line}: Type mismatch: {details}.")
            },
            Self::DivideByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::UninitializedValue { name, line } => write!(f,
                                                              "Error on line {line}: '{name}' was used before it was given a value."),
            Self::MutatedLet { name, line } => write!(f,
                                                      "Error on line {line}: '{name}' is declared with let and cannot be changed."),
            Self::MutatedNonBindable { name, line } => {
                write!(f, "Error on line {line}: '{name}' cannot be changed.")
            },
            Self::NotDefined { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not defined.")
            },
            Self::ArgumentCountMismatch { expected,
                                          found,
                                          line, } => write!(f,
                                                            "Error on line {line}: Expected {expected} argument(s) but found {found}."),
            Self::IndexOutOfRange { index, length, line } => write!(f,
                                                                    "Error on line {line}: Index {index} is out of range for length {length}."),
            Self::StepLimitExceeded { limit, line } => write!(f,
                                                              "Error on line {line}: Execution limit exceeded (possible infinite loop) after {limit} steps."),
            Self::General { message, line } => write!(f, "Error on line {line}: {message}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
