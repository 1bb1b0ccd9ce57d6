use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::ScopeId,
        },
        value::{
            convert::{can_assign, convert_value},
            core::Value,
        },
    },
    util::num::usize_to_f64_checked,
};

/// Returns the length of a string or array.
///
/// Strings count characters, not bytes.
///
/// # Errors
/// `TypeMismatch` for any other value.
///
/// # Example
/// ```
/// use m87::{
///     ast::Expr,
///     interpreter::{
///         evaluator::{core::Context, function::builtin::length, scope::ScopeId},
///         value::core::Value,
///     },
/// };
///
/// let mut context = Context::default();
/// let arg = [Expr::Literal { value: "héllo".into(),
///                            line:  1, }];
///
/// assert_eq!(length(&mut context, &arg, ScopeId::ROOT, 1).unwrap(), Value::Number(5.0));
/// ```
pub fn length(context: &mut Context,
              args: &[Expr],
              scope: ScopeId,
              line: usize)
              -> EvalResult<Value> {
    let count = match context.eval(&args[0], scope)? {
        Value::Str(s) => s.chars().count(),
        Value::Array { elements, .. } => elements.len(),
        other => {
            return Err(RuntimeError::mismatch(format!("length needs a string or an array, \
                                                       found {}",
                                                      other.type_of()),
                                              line).into());
        },
    };

    Ok(Value::Number(usize_to_f64_checked(count, line)?))
}

/// Rounds a number to the nearest integer, halves away from zero.
///
/// # Errors
/// `TypeMismatch` if the argument is not a number.
pub fn round(context: &mut Context,
             args: &[Expr],
             scope: ScopeId,
             line: usize)
             -> EvalResult<Value> {
    match context.eval(&args[0], scope)? {
        Value::Number(n) => Ok(Value::Number(n.round())),
        other => Err(RuntimeError::mismatch(format!("round needs a number, found {}",
                                                    other.type_of()),
                                            line).into()),
    }
}

/// Appends an element to an array variable in place.
///
/// The first argument must name a variable bound with `var` to an array.
/// The element must fit the array's element type.
///
/// # Errors
/// - `MutatedNonBindable` if the first argument is not a plain variable.
/// - `MutatedLet` if the variable was declared with `let`.
/// - `TypeMismatch` if the variable is not an array or the element does not
///   fit.
pub fn append(context: &mut Context,
              args: &[Expr],
              scope: ScopeId,
              line: usize)
              -> EvalResult<Value> {
    let Expr::Variable { name, .. } = &args[0] else {
        return Err(RuntimeError::MutatedNonBindable { name: "the first argument of append".into(),
                                                      line }.into());
    };

    let Value::Array { mut elements,
                       element_type, } = context.eval(&args[0], scope)?
    else {
        return Err(RuntimeError::mismatch(format!("append needs an array, '{name}' is not one"),
                                          line).into());
    };

    let element = context.eval(&args[1], scope)?;
    let actual = element.type_of();
    if !can_assign(&element_type, &actual) {
        return Err(RuntimeError::mismatch(format!("cannot append {actual} to an array of \
                                                   {element_type}"),
                                          line).into());
    }

    elements.push(element);
    context.env.modify_variable(scope,
                                name,
                                Value::Array { elements,
                                               element_type },
                                line)?;

    Ok(Value::Void)
}

/// Converts a value to the type given by the first argument.
///
/// `convert(number, x)` with a type written in place is handled while
/// parsing; this covers a type that is only known at runtime, such as one
/// stored in a variable.
///
/// # Errors
/// `TypeMismatch` if the first argument is not a type or the conversion is
/// not allowed.
pub fn convert(context: &mut Context,
               args: &[Expr],
               scope: ScopeId,
               line: usize)
               -> EvalResult<Value> {
    let Value::Type(to) = context.eval(&args[0], scope)? else {
        let details = "the first argument of convert must be a type";
        return Err(RuntimeError::mismatch(details, line).into());
    };

    let value = context.eval(&args[1], scope)?;
    convert_value(value, &to, line)
}
