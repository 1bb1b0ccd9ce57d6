use tracing::debug;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Halt},
            scope::ScopeId,
        },
        value::core::Value,
    },
};

/// Name of the hidden root binding that carries a line of input into a
/// resumed run.
pub const INPUT_VARIABLE: &str = "_input";

/// Reads a line of input.
///
/// If input is pending in the root scope it is consumed and returned as a
/// string. Otherwise the prompt is evaluated and the run is suspended with
/// [`Halt::AwaitInput`]; the driver re-runs the current top-level statement
/// once input arrives.
///
/// # Parameters
/// - `context`: The running context.
/// - `args`: The prompt expression.
/// - `scope`: Scope the prompt is evaluated in.
/// - `line`: Line number for error reporting.
///
/// # Errors
/// - `TypeMismatch` if the prompt is not a string.
/// - [`Halt::AwaitInput`] when no input is pending.
///
/// # Example
/// ```
/// use m87::{
///     ast::Expr,
///     interpreter::{
///         evaluator::{
///             core::{Context, Halt},
///             function::input::input,
///             scope::ScopeId,
///         },
///         value::core::Value,
///     },
/// };
///
/// let mut context = Context::default();
/// let prompt = [Expr::Literal { value: "name? ".into(),
///                               line:  1, }];
///
/// let halt = input(&mut context, &prompt, ScopeId::ROOT, 1).unwrap_err();
/// assert_eq!(halt, Halt::AwaitInput { prompt: "name? ".into() });
/// ```
pub fn input(context: &mut Context,
             args: &[Expr],
             scope: ScopeId,
             line: usize)
             -> EvalResult<Value> {
    if let Some(binding) = context.env.remove(ScopeId::ROOT, INPUT_VARIABLE)
       && let Some(value) = binding.value()
    {
        debug!(line, "consumed pending input");
        return Ok(value.clone());
    }

    let prompt = match args.first() {
        Some(arg) => context.eval(arg, scope)?,
        None => Value::Str(String::new()),
    };

    match prompt {
        Value::Str(prompt) => {
            debug!(line, %prompt, "suspending for input");
            Err(Halt::AwaitInput { prompt })
        },
        other => Err(RuntimeError::mismatch(format!("the prompt of input must be a string, \
                                                     found {}",
                                                    other.type_of()),
                                            line).into()),
    }
}
