/// The driver runs whole programs and suspends them for input.
///
/// A [`Runner`](driver::Runner) owns the parsed program and its evaluation
/// context. It executes top-level statements in order, stops when a
/// statement asks for input, and picks up at that statement once input is
/// supplied.
pub mod driver;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// manages scopes and variable state, and produces output. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements, counting every step.
/// - Handles variables, structs, functions, and control flow.
/// - Reports runtime errors such as division by zero or type mismatches.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their source line.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// Statements are split into logical lines and blocks first. Expressions
/// then pass through disambiguation, structural resolution, precedence
/// merging and lowering.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Validates grammar and syntax, reporting errors with their line.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a program computes with: numbers,
/// strings, booleans, arrays, nulls, types, structs and functions. It also
/// provides the assignability rules and type conversion.
///
/// # Responsibilities
/// - Defines the `Value` and `Type` enums and variable bindings.
/// - Implements assignability checks and `convert`.
pub mod value;
