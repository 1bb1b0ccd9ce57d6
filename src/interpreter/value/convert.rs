use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Type, Value},
    },
};

/// Tests whether a value of type `actual` may be stored where `declared` is
/// expected.
///
/// Types must match exactly, except that `optional(T)` also accepts a bare
/// `T`. The widening is one-way.
///
/// # Example
/// ```
/// use m87::interpreter::value::{convert::can_assign, core::Type};
///
/// let optional = Type::Optional(Box::new(Type::Number));
///
/// assert!(can_assign(&Type::Number, &Type::Number));
/// assert!(can_assign(&optional, &Type::Number));
/// assert!(!can_assign(&Type::Number, &optional));
/// assert!(!can_assign(&Type::String, &Type::Number));
/// ```
#[must_use]
pub fn can_assign(declared: &Type, actual: &Type) -> bool {
    if declared == actual {
        return true;
    }

    matches!(declared, Type::Optional(inner) if inner.as_ref() == actual)
}

/// Tests whether `convert` can turn a value of type `from` into type `to`.
///
/// Allowed are identical types, string to number and back, boolean to string,
/// and arrays whose element types are convertible.
#[must_use]
pub fn convertible(from: &Type, to: &Type) -> bool {
    match (from, to) {
        _ if from == to => true,
        (Type::String, Type::Number)
        | (Type::Number | Type::Boolean, Type::String) => true,
        (Type::Array(a), Type::Array(b)) => convertible(a, b),
        _ => false,
    }
}

/// Converts a value to another type.
///
/// Numbers and booleans become their display form. A string that does not
/// parse as a number becomes `null(number)`. Arrays convert element by element.
///
/// # Parameters
/// - `value`: The value to convert.
/// - `to`: The target type.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The converted value.
///
/// # Errors
/// `TypeMismatch` if the conversion is not allowed.
///
/// # Example
/// ```
/// use m87::interpreter::value::{
///     convert::convert_value,
///     core::{Type, Value},
/// };
///
/// let n = convert_value(Value::Str("42".into()), &Type::Number, 1).unwrap();
/// assert_eq!(n, Value::Number(42.0));
///
/// let s = convert_value(Value::Number(2.5), &Type::String, 1).unwrap();
/// assert_eq!(s, Value::Str("2.5".into()));
///
/// let bad = convert_value(Value::Str("abc".into()), &Type::Number, 1).unwrap();
/// assert_eq!(bad, Value::Null(Type::Number));
/// ```
pub fn convert_value(value: Value, to: &Type, line: usize) -> EvalResult<Value> {
    let from = value.type_of();

    if !convertible(&from, to) {
        return Err(RuntimeError::mismatch(format!("cannot convert {from} to {to}"), line).into());
    }

    if &from == to {
        return Ok(value);
    }

    match (value, to) {
        (Value::Str(s), Type::Number) => {
            Ok(s.trim().parse::<f64>().map_or(Value::Null(Type::Number), Value::Number))
        },
        (v @ (Value::Number(_) | Value::Bool(_)), Type::String) => Ok(Value::Str(v.to_string())),
        (Value::Array { elements, .. }, Type::Array(element_type)) => {
            let elements = elements.into_iter()
                                   .map(|e| convert_value(e, element_type, line))
                                   .collect::<EvalResult<Vec<_>>>()?;
            Ok(Value::Array { elements,
                              element_type: element_type.as_ref().clone() })
        },
        (value, _) => {
            Err(RuntimeError::mismatch(format!("cannot convert {} to {to}", value.type_of()),
                                       line).into())
        },
    }
}
