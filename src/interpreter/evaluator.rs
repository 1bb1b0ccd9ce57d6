/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, comparisons, logical operators
/// and ranges.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, the step
/// counter and statement execution.
pub mod core;

/// Scopes and variable bindings.
///
/// An arena of scopes with parent links, plus the checked declare, assign
/// and lookup operations.
pub mod scope;

/// Array literals, indexing and index assignment.
pub mod array;

/// Evaluation of `for` loops.
///
/// Iterates arrays and strings in lockstep, binding one variable per
/// iterable.
pub mod for_loop;

/// Struct templates, instances, member access and methods.
pub mod structure;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
