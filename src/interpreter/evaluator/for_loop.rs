use crate::{
    ast::{BindingMode, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            scope::ScopeId,
        },
        value::core::{Type, Value},
    },
};

impl Context {
    /// Executes a `for` loop.
    ///
    /// Every iterable is evaluated once, before the first iteration. Arrays
    /// yield their elements and strings yield one-character strings. The
    /// iterables advance together and the loop ends with the shortest one.
    ///
    /// Each iteration runs in a fresh child scope of `scope`, where every name
    /// is bound with `var` to the current element of its iterable.
    ///
    /// # Parameters
    /// - `names`: Iterator variable names.
    /// - `iterables`: Expressions iterated over, one per name.
    /// - `body`: Statements executed on every iteration.
    /// - `scope`: Scope the loop runs in.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// [`Flow::Returned`] if the body executed a `return`, otherwise
    /// [`Flow::Completed`].
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` if there are not as many names as iterables.
    /// - `TypeMismatch` if an iterable is neither an array nor a string.
    pub(crate) fn execute_for(&mut self,
                              names: &[String],
                              iterables: &[Expr],
                              body: &[Statement],
                              scope: ScopeId,
                              line: usize)
                              -> EvalResult<Flow> {
        if names.len() != iterables.len() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: names.len(),
                                                             found: iterables.len(),
                                                             line }.into());
        }

        let sequences = iterables.iter()
                                 .map(|expr| self.eval_sequence(expr, scope, line))
                                 .collect::<EvalResult<Vec<_>>>()?;
        let count = sequences.iter().map(|(items, _)| items.len()).min().unwrap_or(0);

        for i in 0..count {
            let flow = self.with_scope(scope, |ctx, inner| {
                               for (name, (items, ty)) in names.iter().zip(&sequences) {
                                   ctx.env.add_variable(inner,
                                                        name,
                                                        Some(items[i].clone()),
                                                        BindingMode::Var,
                                                        ty.clone(),
                                                        line)?;
                               }
                               ctx.execute_block(body, inner)
                           })?;

            if let Flow::Returned(_) = flow {
                return Ok(flow);
            }
        }

        Ok(Flow::Completed)
    }

    /// Evaluates an iterable into its items and their type.
    fn eval_sequence(&mut self,
                     expr: &Expr,
                     scope: ScopeId,
                     line: usize)
                     -> EvalResult<(Vec<Value>, Type)> {
        match self.eval(expr, scope)? {
            Value::Array { elements,
                           element_type, } => Ok((elements, element_type)),
            Value::Str(s) => {
                let chars = s.chars().map(|c| Value::Str(c.to_string())).collect();
                Ok((chars, Type::String))
            },
            other => Err(RuntimeError::mismatch(format!("cannot iterate over {}", other.type_of()),
                                                line).into()),
        }
    }
}
