use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::ScopeId,
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation written in the source.
    ///
    /// `&&` and `||` evaluate their right operand only when needed. Every
    /// other operator evaluates both operands, left first, and hands them to
    /// [`eval_binary`](Self::eval_binary).
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `scope`: Scope the operands are evaluated in.
    /// - `line`: Line number for error reporting.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 scope: ScopeId,
                                 line: usize)
                                 -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(op, left, right, scope, line);
        }

        let left = self.eval(left, scope)?;
        let right = self.eval(right, scope)?;
        self.eval_binary(op, &left, &right, line)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic goes to `eval_scalar_op`, ordering and equality to
    /// `eval_comparison`, and `->` to `eval_range`. The logical operators are
    /// not handled here because they never evaluate both sides eagerly.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed value. Building a range costs one step per element.
    ///
    /// # Example
    /// ```
    /// use m87::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut context = Context::default();
    ///
    /// let sum = context.eval_binary(BinaryOperator::Add,
    ///                               &Value::Str("ab".into()),
    ///                               &Value::Str("cd".into()),
    ///                               1).unwrap();
    /// assert_eq!(sum, Value::Str("abcd".into()));
    ///
    /// let range = context.eval_binary(BinaryOperator::Range,
    ///                                 &Value::Number(1.0),
    ///                                 &Value::Number(3.0),
    ///                                 1).unwrap();
    /// assert_eq!(range, Value::number_array([1.0, 2.0, 3.0]));
    /// ```
    pub fn eval_binary(&mut self,
                       op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Range, Sub,
        };

        let value = match op {
            Add | Sub | Mul | Div | Mod => Self::eval_scalar_op(op, left, right, line)?,
            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, line)?
            },
            Range => self.eval_range(left, right, line)?,
            And | Or => Self::eval_bool_pair(op, left, right, line)?,
        };
        Ok(value)
    }
}
