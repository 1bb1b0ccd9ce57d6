/// Built-in function implementations.
///
/// Contains `length`, `round`, `append` and the runtime form of `convert`.
pub mod builtin;
/// The `input` function implementation.
///
/// Suspends the run until the caller supplies a line of input.
pub mod input;
/// The `print` function implementation.
///
/// Appends a line to the program output.
pub mod print;

/// The builtin table and function call evaluation.
///
/// Dispatches calls to builtins or user-defined functions and checks
/// arguments and return values.
pub mod core;
