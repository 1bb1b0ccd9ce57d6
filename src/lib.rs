//! # m87
//!
//! m87 is a small, statically typed scripting language written in Rust.
//! Programs declare typed variables, functions and structs, and can pause to
//! ask for input. Every run is bounded by a step ceiling.
//!
//! The [`run_source`] function runs a program that needs no input. Programs
//! that read input are driven by [`interpreter::driver::Runner`].

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::{Error, RuntimeError},
    interpreter::driver::{RunState, Runner},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and source
/// locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Flattens any error into a phase-tagged diagnostic.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations to provide a complete runtime for m87 programs. It exposes
/// the driver that runs programs and suspends them for input.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and driver.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides conversion routines used by the parser and the
/// evaluator: number formatting and safe conversions between integer and
/// floating-point types.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Format numbers the way programs print them.
pub mod util;

/// Runs a program and returns the lines it printed.
///
/// The program must not ask for input; use
/// [`Runner`](interpreter::driver::Runner) for programs that do.
///
/// # Errors
/// Returns the first lexer, parser or runtime error. A program that asks for
/// input fails with a `General` runtime error.
///
/// # Examples
/// ```
/// use m87::run_source;
///
/// let output = run_source("var x: number = 2\nx = x * 21\nprint(\"x = \", x)").unwrap();
/// assert_eq!(output, ["x = 42"]);
///
/// // 'y' is not defined.
/// let err = run_source("print(y)").unwrap_err();
/// assert_eq!(err.diagnostic().kind, "NotDefined");
/// ```
pub fn run_source(source: &str) -> Result<Vec<String>, Error> {
    let mut runner = Runner::new(source)?;

    match runner.run()? {
        RunState::Finished => Ok(runner.output().to_vec()),
        RunState::AwaitingInput { .. } => {
            let line = runner.current_line();
            Err(RuntimeError::general("the program asked for input, but none is available",
                                      line).into())
        },
    }
}
