/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing source text,
/// grouping it into statements, or disambiguating and merging expressions.
/// Every parse error knows which of those phases raised it.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution, such as type mismatches, division by zero, mutation of `let`
/// bindings, or exhausting the step ceiling.
pub mod runtime_error;
/// Phase-tagged diagnostics.
///
/// Wraps parse and runtime errors into the single [`Error`] type returned by
/// the public API and flattens any of them into a [`Diagnostic`].
pub mod diagnostic;

pub use diagnostic::{Diagnostic, Error, Phase};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
