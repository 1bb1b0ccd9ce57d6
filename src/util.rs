/// Numeric conversion and formatting helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, and the canonical
/// integer-or-decimal formatting used whenever a number is displayed.
///
/// All conversions return a `Result`, which is `Ok` if the conversion is
/// lossless and valid, or a `RuntimeError` carrying the source line otherwise.
pub mod num;
