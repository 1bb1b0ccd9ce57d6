use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::ScopeId,
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates the operand of a prefix operator and applies it.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                scope: ScopeId,
                                line: usize)
                                -> EvalResult<Value> {
        let value = self.eval(expr, scope)?;
        Ok(Self::eval_unary(op, &value, line)?)
    }

    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation.
    /// - `Not`: boolean negation.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value`.
    ///
    /// # Errors
    /// `TypeMismatch` if the operand has the wrong type.
    ///
    /// # Example
    /// ```
    /// use m87::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Number(5.0), 1).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Bool(false), 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// assert!(Context::eval_unary(UnaryOperator::Not, &Value::Number(1.0), 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator,
                      value: &Value,
                      line: usize)
                      -> Result<Value, RuntimeError> {
        match (op, value) {
            (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (op, value) => Err(RuntimeError::mismatch(format!("cannot apply '{op}' to {}",
                                                              value.type_of()),
                                                      line)),
        }
    }
}
