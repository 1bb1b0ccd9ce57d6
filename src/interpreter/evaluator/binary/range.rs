use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::{f64_to_i64_checked, i64_to_f64_checked},
};

impl Context {
    /// Evaluates `start -> end` into the array of integers from `start` to
    /// `end`, both included.
    ///
    /// Fractional bounds are truncated toward zero first. Every element costs
    /// one step, so a range cannot outgrow the step ceiling.
    ///
    /// # Errors
    /// - `TypeMismatch` if a bound is not a number.
    /// - `General` if `start` is greater than `end`.
    /// - `StepLimitExceeded` if the elements exhaust the step budget.
    ///
    /// # Example
    /// ```
    /// use m87::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut context = Context::default();
    /// let range = context.eval_range(&Value::Number(-1.0), &Value::Number(1.5), 1).unwrap();
    /// assert_eq!(range, Value::number_array([-1.0, 0.0, 1.0]));
    ///
    /// assert!(context.eval_range(&Value::Number(5.0), &Value::Number(1.0), 1).is_err());
    /// ```
    pub fn eval_range(&mut self, start: &Value, end: &Value, line: usize) -> EvalResult<Value> {
        let (Value::Number(start), Value::Number(end)) = (start, end) else {
            return Err(RuntimeError::mismatch(format!("a range needs numbers, found {} and {}",
                                                      start.type_of(),
                                                      end.type_of()),
                                              line).into());
        };

        if start > end {
            return Err(RuntimeError::general("start index is bigger than end index", line).into());
        }

        let start = f64_to_i64_checked(start.trunc(), line)?;
        let end = f64_to_i64_checked(end.trunc(), line)?;

        let mut elements = Vec::new();
        for n in start..=end {
            self.tick(line)?;
            elements.push(i64_to_f64_checked(n, line)?);
        }
        Ok(Value::number_array(elements))
    }
}
