use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::Context,
        value::{convert::can_assign, core::Value},
    },
};

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `<`, `>`, `<=` and `>=` take numbers. `==` and `!=` compare with
    /// [`values_equal`].
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// A boolean value.
    ///
    /// # Example
    /// ```
    /// use m87::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Number(3.0);
    /// let b = Value::Number(5.0);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &a, &b, 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> Result<Value, RuntimeError> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let result = match op {
            Equal => values_equal(left, right, line)?,
            NotEqual => !values_equal(left, right, line)?,
            _ => {
                let (Value::Number(a), Value::Number(b)) = (left, right) else {
                    return Err(RuntimeError::mismatch(format!("cannot compare {} and {} with \
                                                               '{op}'",
                                                              left.type_of(),
                                                              right.type_of()),
                                                      line));
                };
                match op {
                    Less => a < b,
                    Greater => a > b,
                    LessEqual => a <= b,
                    GreaterEqual => a >= b,
                    _ => unreachable!("eval_comparison used with a non-comparison operator"),
                }
            },
        };

        Ok(Value::Bool(result))
    }
}

/// Structural equality between two values.
///
/// - Numbers, strings, booleans and types compare by value.
/// - Arrays compare element by element; different lengths are unequal.
/// - Two nulls are equal when their types are.
/// - A null and a value that could be stored in the null's optional type are
///   unequal.
///
/// # Errors
/// `TypeMismatch` for any other pair.
///
/// # Example
/// ```
/// use m87::interpreter::{
///     evaluator::binary::comparison::values_equal,
///     value::core::{Type, Value},
/// };
///
/// let null = Value::Null(Type::Number);
///
/// assert!(!values_equal(&null, &Value::Number(1.0), 1).unwrap());
/// assert!(values_equal(&null, &Value::Null(Type::Number), 1).unwrap());
/// assert!(values_equal(&Value::Str("a".into()), &Value::Number(1.0), 1).is_err());
/// ```
pub fn values_equal(left: &Value, right: &Value, line: usize) -> Result<bool, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Type(a), Value::Type(b)) | (Value::Null(a), Value::Null(b)) => Ok(a == b),
        (Value::Array { elements: a, .. }, Value::Array { elements: b, .. }) => {
            if a.len() != b.len() {
                return Ok(false);
            }
            for (x, y) in a.iter().zip(b) {
                if !values_equal(x, y, line)? {
                    return Ok(false);
                }
            }
            Ok(true)
        },
        (null @ Value::Null(_), value) | (value, null @ Value::Null(_))
            if can_assign(&null.type_of(), &value.type_of()) =>
        {
            Ok(false)
        },
        _ => Err(RuntimeError::mismatch(format!("cannot compare {} and {}",
                                                left.type_of(),
                                                right.type_of()),
                                        line)),
    }
}
