use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::ScopeId,
        },
        value::{convert::can_assign, core::Value},
    },
    util::num::f64_to_index_checked,
};

impl Context {
    /// Evaluates an array literal.
    ///
    /// The element type is taken from the first element; every other element
    /// must be assignable to it.
    ///
    /// # Parameters
    /// - `elements`: Element expressions.
    /// - `scope`: Scope the elements are evaluated in.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// `TypeMismatch` if the literal is empty or mixes element types.
    ///
    /// # Example
    /// ```
    /// use m87::{
    ///     ast::Expr,
    ///     interpreter::{
    ///         evaluator::{core::Context, scope::ScopeId},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut context = Context::default();
    /// let literal = Expr::ArrayLiteral { elements: vec![Expr::Literal { value: 1.0.into(),
    ///                                                                   line:  1, },
    ///                                                   Expr::Literal { value: 2.0.into(),
    ///                                                                   line:  1, }],
    ///                                    line:     1, };
    ///
    /// let value = context.eval(&literal, ScopeId::ROOT).unwrap();
    /// assert_eq!(value, Value::number_array([1.0, 2.0]));
    /// ```
    pub(crate) fn eval_array_literal(&mut self,
                                     elements: &[Expr],
                                     scope: ScopeId,
                                     line: usize)
                                     -> EvalResult<Value> {
        let values = elements.iter()
                             .map(|e| self.eval(e, scope))
                             .collect::<EvalResult<Vec<_>>>()?;

        let Some(first) = values.first() else {
            let details = "cannot infer the element type of an empty array";
            return Err(RuntimeError::mismatch(details, line).into());
        };
        let element_type = first.type_of();

        if let Some(odd) = values.iter().find(|v| !can_assign(&element_type, &v.type_of())) {
            return Err(RuntimeError::mismatch(format!("array elements must share a type, found \
                                                       {element_type} and {}",
                                                      odd.type_of()),
                                              line).into());
        }

        Ok(Value::Array { elements: values,
                          element_type })
    }

    /// Evaluates `array[index]`.
    ///
    /// Arrays yield their element. Strings yield the character at `index`
    /// as a one-character string.
    ///
    /// # Errors
    /// - `TypeMismatch` if the indexed value is not an array or string, or
    ///   the index is not a whole number.
    /// - `IndexOutOfRange` if the index is negative or too large.
    pub(crate) fn eval_index(&mut self,
                             array: &Expr,
                             index: &Expr,
                             scope: ScopeId,
                             line: usize)
                             -> EvalResult<Value> {
        let target = self.eval(array, scope)?;
        let index = self.eval_index_number(index, scope, line)?;

        match target {
            Value::Array { mut elements, .. } => {
                let i = f64_to_index_checked(index, elements.len(), line)?;
                Ok(elements.swap_remove(i))
            },
            Value::Str(s) => {
                let chars = s.chars().collect::<Vec<_>>();
                let i = f64_to_index_checked(index, chars.len(), line)?;
                Ok(Value::Str(chars[i].to_string()))
            },
            other => Err(RuntimeError::mismatch(format!("cannot index into {}", other.type_of()),
                                                line).into()),
        }
    }

    /// Executes `xs[i] = value`.
    ///
    /// # Errors
    /// - `MutatedNonBindable` if `array` is not a plain variable.
    /// - `TypeMismatch` if the variable is not an array or the value does not
    ///   fit its element type.
    /// - `IndexOutOfRange` if the index is outside the array.
    /// - `MutatedLet` if the variable was declared with `let`.
    pub(crate) fn assign_index(&mut self,
                               array: &Expr,
                               index: &Expr,
                               value: &Expr,
                               scope: ScopeId,
                               line: usize)
                               -> EvalResult<()> {
        let Expr::Variable { name, .. } = array else {
            return Err(RuntimeError::MutatedNonBindable { name: "indexed expression".into(),
                                                          line }.into());
        };

        let Value::Array { mut elements,
                           element_type, } = self.eval(array, scope)?
        else {
            let details = format!("cannot assign to an element of '{name}', it is not an array");
            return Err(RuntimeError::mismatch(details, line).into());
        };

        let i = f64_to_index_checked(self.eval_index_number(index, scope, line)?,
                                     elements.len(),
                                     line)?;

        let value = self.eval(value, scope)?;
        let actual = value.type_of();
        if !can_assign(&element_type, &actual) {
            return Err(RuntimeError::mismatch(format!("cannot store {actual} in an array of \
                                                       {element_type}"),
                                              line).into());
        }

        elements[i] = value;
        self.env.modify_variable(scope,
                                 name,
                                 Value::Array { elements,
                                                element_type },
                                 line)?;
        Ok(())
    }

    fn eval_index_number(&mut self, index: &Expr, scope: ScopeId, line: usize) -> EvalResult<f64> {
        match self.eval(index, scope)? {
            Value::Number(n) => Ok(n),
            other => Err(RuntimeError::mismatch(format!("an index must be a number, found {}",
                                                        other.type_of()),
                                                line).into()),
        }
    }
}
