use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates an arithmetic operation.
    ///
    /// `+` adds numbers or concatenates strings. `-`, `*`, `/` and `%` take
    /// numbers only. `%` keeps the sign of the dividend, like a truncated
    /// remainder. A zero divisor is rejected for both `/` and `%`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed value.
    ///
    /// # Errors
    /// - `DivideByZero` for `/` or `%` by zero.
    /// - `TypeMismatch` for any other operand types.
    ///
    /// # Example
    /// ```
    /// use m87::{
    ///     ast::BinaryOperator,
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let x = Value::Number(-7.0);
    /// let y = Value::Number(3.0);
    ///
    /// let result = Context::eval_scalar_op(BinaryOperator::Mod, &x, &y, 1).unwrap();
    /// assert_eq!(result, Value::Number(-1.0));
    ///
    /// let err = Context::eval_scalar_op(BinaryOperator::Div, &x, &Value::Number(0.0), 2);
    /// assert_eq!(err, Err(RuntimeError::DivideByZero { line: 2 }));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> Result<Value, RuntimeError> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};

        let (a, b) = match (left, right) {
            (Value::Number(a), Value::Number(b)) => (*a, *b),
            (Value::Str(a), Value::Str(b)) if op == Add => {
                return Ok(Value::Str(format!("{a}{b}")));
            },
            _ => return Err(mismatch(op, left, right, line)),
        };

        let result = match op {
            Add => a + b,
            Sub => a - b,
            Mul => a * b,
            Div | Mod if b == 0.0 => return Err(RuntimeError::DivideByZero { line }),
            Div => a / b,
            Mod => a % b,
            _ => return Err(mismatch(op, left, right, line)),
        };

        Ok(Value::Number(result))
    }
}

fn mismatch(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::mismatch(format!("cannot apply '{op}' to {} and {}",
                                   left.type_of(),
                                   right.type_of()),
                           line)
}
