use crate::{
    ast::Expr,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::ScopeId,
        },
        value::core::Value,
    },
};

/// Appends one line to the program output.
///
/// Accepts any number of arguments. Each is evaluated in order and their
/// display forms are joined without a separator.
///
/// # Parameters
/// - `context`: The running context; the line goes to `context.output`.
/// - `args`: Argument expressions.
/// - `scope`: Scope the arguments are evaluated in.
///
/// # Returns
/// `Value::Void`.
///
/// # Example
/// ```
/// use m87::{
///     ast::Expr,
///     interpreter::{
///         evaluator::{core::Context, function::print::print, scope::ScopeId},
///         value::core::Value,
///     },
/// };
///
/// let mut context = Context::default();
/// let args = [Expr::Literal { value: "x = ".into(),
///                             line:  1, },
///             Expr::Literal { value: 4.0.into(),
///                             line:  1, }];
///
/// assert_eq!(print(&mut context, &args, ScopeId::ROOT, 1).unwrap(), Value::Void);
/// assert_eq!(context.output, vec!["x = 4".to_string()]);
/// ```
pub fn print(context: &mut Context,
             args: &[Expr],
             scope: ScopeId,
             _line: usize)
             -> EvalResult<Value> {
    let mut line = String::new();
    for arg in args {
        line.push_str(&context.eval(arg, scope)?.to_string());
    }

    context.output.push(line);
    Ok(Value::Void)
}
