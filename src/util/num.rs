use crate::error::RuntimeError;

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;
/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Formats a number the way the language prints it.
///
/// Whole numbers print without a fractional part; anything else prints with
/// the shortest representation that round-trips.
///
/// ## Example
/// ```
/// use m87::util::num::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(-0.5), "-0.5");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= 9_007_199_254_740_991.0 {
        let whole = value as i64;
        if whole == 0 {
            return "0".to_string();
        }
        return whole.to_string();
    }

    value.to_string()
}

/// Safely converts an `f64` to `i64` if the value is finite, within range, and
/// not fractional.
///
/// ## Errors
/// - `TypeMismatch` for fractional or non-finite values.
/// - `General` for values outside the exactly representable range.
///
/// ## Parameters
/// - `value`: The floating-point value to convert.
/// - `line`: Source code line number for error reporting.
///
/// ## Example
/// ```
/// use m87::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(-7.0, 1).unwrap(), -7);
///
/// let err = f64_to_i64_checked(1.5, 3).unwrap_err();
/// assert!(matches!(err, RuntimeError::TypeMismatch { line: 3, .. }));
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, line: usize) -> Result<i64, RuntimeError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(RuntimeError::mismatch(format!("expected a whole number but found {value}"),
                                          line));
    }
    if value.abs() > MAX_SAFE_I64_INT as f64 {
        return Err(RuntimeError::general(format!("{value} is too large"), line));
    }

    Ok(value as i64)
}

/// Converts a number into an index for a sequence of `length` elements.
///
/// ## Errors
/// - `TypeMismatch` if the number is not whole.
/// - `IndexOutOfRange` if the index is negative or not below `length`.
///
/// ## Example
/// ```
/// use m87::{error::RuntimeError, util::num::f64_to_index_checked};
///
/// assert_eq!(f64_to_index_checked(2.0, 3, 1).unwrap(), 2);
///
/// let err = f64_to_index_checked(3.0, 3, 9).unwrap_err();
/// assert!(matches!(err,
///                  RuntimeError::IndexOutOfRange { index: 3,
///                                                  length: 3,
///                                                  line: 9 }));
/// ```
pub fn f64_to_index_checked(value: f64,
                            length: usize,
                            line: usize)
                            -> Result<usize, RuntimeError> {
    let index = f64_to_i64_checked(value, line)?;

    usize::try_from(index).ok()
                          .filter(|i| *i < length)
                          .ok_or(RuntimeError::IndexOutOfRange { index,
                                                                 length,
                                                                 line })
}

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `General` if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use m87::util::num::usize_to_f64_checked;
///
/// assert_eq!(usize_to_f64_checked(100, 0).unwrap(), 100.0);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked(value: usize, line: usize) -> Result<f64, RuntimeError> {
    if value as u64 > MAX_SAFE_U64_INT {
        return Err(RuntimeError::general(format!("{value} is too large"), line));
    }

    Ok(value as f64)
}

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `General` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked(value: i64, line: usize) -> Result<f64, RuntimeError> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(RuntimeError::general(format!("{value} is too large"), line));
    }

    Ok(value as f64)
}
