/// Binary operation dispatch.
///
/// Evaluates operands, short-circuits the logical operators and routes every
/// other operator to its handler.
pub mod core;

/// Arithmetic on numbers and string concatenation.
pub mod scalar;

/// Ordering comparisons and structural equality.
pub mod comparison;

/// Logical AND and OR.
pub mod logic;

/// The inclusive integer range operator `->`.
pub mod range;
