use crate::{
    ast::{BinaryOperator, Expr},
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
    /// Evaluates `&&` or `||`, skipping the right operand when the left one
    /// already decides the result.
    ///
    /// # Parameters
    /// - `op`: `And` or `Or`.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    /// - `scope`: Scope the operands are evaluated in.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// `TypeMismatch` if an evaluated operand is not a boolean.
    pub(crate) fn eval_logic(&mut self,
                             op: BinaryOperator,
                             left: &Expr,
                             right: &Expr,
                             scope: ScopeId,
                             line: usize)
                             -> EvalResult<Value> {
        let left = expect_bool(op, &self.eval(left, scope)?, line)?;

        match (op, left) {
            (BinaryOperator::And, false) => Ok(Value::Bool(false)),
            (BinaryOperator::Or, true) => Ok(Value::Bool(true)),
            _ => Ok(Value::Bool(expect_bool(op, &self.eval(right, scope)?, line)?)),
        }
    }

    /// Evaluates a logical operation between two already evaluated booleans.
    ///
    /// # Example
    /// ```
    /// use m87::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Bool(true);
    /// let b = Value::Bool(false);
    ///
    /// let result = Context::eval_bool_pair(BinaryOperator::Or, &a, &b, 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_bool_pair(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> Result<Value, RuntimeError> {
        let left = expect_bool(op, left, line)?;
        let right = expect_bool(op, right, line)?;

        match op {
            BinaryOperator::And => Ok(Value::Bool(left && right)),
            BinaryOperator::Or => Ok(Value::Bool(left || right)),
            _ => unreachable!("eval_bool_pair used with a non-logical operator"),
        }
    }
}

fn expect_bool(op: BinaryOperator, value: &Value, line: usize) -> Result<bool, RuntimeError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(RuntimeError::mismatch(format!("'{op}' needs booleans, found {}",
                                                    other.type_of()),
                                            line)),
    }
}
