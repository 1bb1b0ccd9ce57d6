use std::rc::Rc;

use crate::{
    ast::{BindingMode, Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            function::{builtin, input, print},
            scope::ScopeId,
        },
        value::{
            binding::VariableBinding,
            convert::can_assign,
            core::{FunctionValue, Type, Value},
        },
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives its argument expressions unevaluated, together with the
/// calling scope and the line number, so that `append` can reach the variable
/// it writes to and `input` can suspend before evaluating anything.
type BuiltinFn = fn(&mut Context, &[Expr], ScopeId, usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Any` accepts every count, including zero.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    Any,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"   => { arity: Arity::Any,      func: print::print },
    "length"  => { arity: Arity::Exact(1), func: builtin::length },
    "round"   => { arity: Arity::Exact(1), func: builtin::round },
    "append"  => { arity: Arity::Exact(2), func: builtin::append },
    "input"   => { arity: Arity::Exact(1), func: input::input },
    "convert" => { arity: Arity::Exact(2), func: builtin::convert },
}

impl Arity {
    /// Checks an argument count against this arity.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` if the count is not permitted.
    const fn check(self, found: usize, line: usize) -> Result<(), RuntimeError> {
        match self {
            Self::Exact(expected) if expected != found => {
                Err(RuntimeError::ArgumentCountMismatch { expected,
                                                          found,
                                                          line })
            },
            _ => Ok(()),
        }
    }
}

impl Context {
    /// Evaluates a function call.
    ///
    /// The callee is evaluated like any other expression and must produce a
    /// function. Builtins get their argument expressions as written; user
    /// functions get them evaluated in the calling scope.
    ///
    /// # Parameters
    /// - `callee`: Expression naming the function.
    /// - `arguments`: Argument expressions.
    /// - `scope`: The calling scope.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function result.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            scope: ScopeId,
                            line: usize)
                            -> EvalResult<Value> {
        match self.eval(callee, scope)? {
            Value::Function(FunctionValue::Builtin(name)) => {
                self.call_builtin(name, arguments, scope, line)
            },
            Value::Function(FunctionValue::User(def)) => {
                let args = self.eval_arguments(&def, arguments, scope, line)?;
                self.call_user_function(&def, args, scope, line)
            },
            other => Err(RuntimeError::mismatch(format!("{} is not a function", other.type_of()),
                                                line).into()),
        }
    }

    /// Runs the builtin called `name`.
    fn call_builtin(&mut self,
                    name: &str,
                    arguments: &[Expr],
                    scope: ScopeId,
                    line: usize)
                    -> EvalResult<Value> {
        let builtin = BUILTIN_TABLE.iter()
                                   .find(|b| b.name == name)
                                   .ok_or_else(|| RuntimeError::NotDefined { name: name.to_string(),
                                                                             line })?;
        builtin.arity.check(arguments.len(), line)?;
        (builtin.func)(self, arguments, scope, line)
    }

    /// Checks the argument count of a user function and evaluates the
    /// arguments, left to right, in the calling scope.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` if the count differs from the parameter count.
    pub(crate) fn eval_arguments(&mut self,
                                 def: &FunctionDef,
                                 arguments: &[Expr],
                                 scope: ScopeId,
                                 line: usize)
                                 -> EvalResult<Vec<Value>> {
        if arguments.len() != def.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: def.params.len(),
                                                             found: arguments.len(),
                                                             line }.into());
        }

        arguments.iter().map(|arg| self.eval(arg, scope)).collect()
    }

    /// Executes a user-defined function.
    ///
    /// The body runs in a child scope of the caller, where every parameter
    /// is bound with `let` and checked against its declared type.
    ///
    /// # Errors
    /// - `TypeMismatch` for an argument or return value of the wrong type.
    /// - `General` if a non-void function ends without returning.
    pub(crate) fn call_user_function(&mut self,
                                     def: &Rc<FunctionDef>,
                                     args: Vec<Value>,
                                     scope: ScopeId,
                                     line: usize)
                                     -> EvalResult<Value> {
        self.call_with_bindings(def, args, Vec::new(), scope, line)
    }

    /// Shared body of function and method calls.
    ///
    /// `extra` bindings, such as a method's fields and `self`, are declared
    /// in the call scope before the parameters.
    pub(crate) fn call_with_bindings(&mut self,
                                     def: &Rc<FunctionDef>,
                                     args: Vec<Value>,
                                     extra: Vec<(String, VariableBinding)>,
                                     scope: ScopeId,
                                     line: usize)
                                     -> EvalResult<Value> {
        let return_type = self.resolve_type(&def.return_type, scope, line)?;
        let param_types = def.params
                             .iter()
                             .map(|p| self.resolve_type(&p.ty, scope, line))
                             .collect::<Result<Vec<_>, _>>()?;

        let flow = self.with_scope(scope, |ctx, inner| {
                           for (name, binding) in extra {
                               ctx.env.declare(inner, &name, binding);
                           }
                           let params = def.params.iter().zip(param_types).zip(args);
                           for ((param, ty), value) in params {
                               ctx.env.add_variable(inner,
                                                    &param.name,
                                                    Some(value),
                                                    BindingMode::Let,
                                                    ty,
                                                    line)?;
                           }
                           ctx.execute_block(&def.body, inner)
                       })?;

        finish_call(def, flow, &return_type, line)
    }
}

/// Checks what a function body produced against its return type.
fn finish_call(def: &FunctionDef,
               flow: Flow,
               return_type: &Type,
               line: usize)
               -> EvalResult<Value> {
    match flow {
        Flow::Returned(value) => {
            let actual = value.type_of();
            if can_assign(return_type, &actual) {
                Ok(value)
            } else {
                Err(RuntimeError::mismatch(format!("'{}' must return {return_type} but returned \
                                                    {actual}",
                                                   def.name),
                                           line).into())
            }
        },
        Flow::Completed if *return_type == Type::Void => Ok(Value::Void),
        Flow::Completed => {
            let message = "never returned on a non-void returning function";
            Err(RuntimeError::general(message, line).into())
        },
    }
}
