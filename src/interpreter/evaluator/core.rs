use tracing::debug;

use crate::{
    ast::{BindingMode, Expr, Reference, Statement, TypeExpr},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            function::core::BUILTIN_FUNCTIONS,
            scope::{Environment, ScopeId},
        },
        value::{
            binding::{Slot, VariableBinding},
            convert::convert_value,
            core::{FunctionValue, Type, Value},
        },
    },
};

/// Default ceiling on evaluation steps per run.
pub const MAX_EXECUTION_STEPS: usize = 100_000;

/// Why evaluation stopped early.
///
/// A runtime error aborts the run. A request for input suspends it; the
/// driver records where and resumes later.
#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// Evaluation failed.
    Error(RuntimeError),
    /// `input` was called and no input is pending.
    AwaitInput {
        /// The prompt passed to `input`.
        prompt: String,
    },
}

impl From<RuntimeError> for Halt {
    fn from(e: RuntimeError) -> Self {
        Self::Error(e)
    }
}

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a [`Halt`]
/// describing why evaluation stopped.
pub type EvalResult<T> = Result<T, Halt>;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Control continues with the next statement.
    Completed,
    /// A `return` was executed; enclosing blocks unwind up to the call.
    Returned(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: every scope, the lines printed so
/// far and the step counter that bounds a run.
///
/// ## Usage
///
/// `Context` is created once per program and reused across suspensions. All
/// evaluation methods (like `eval()` and `execute()`) take the scope they run
/// in explicitly.
#[derive(Debug)]
pub struct Context {
    /// All live scopes.
    pub env:       Environment,
    /// Lines produced by `print`, oldest first.
    pub output:    Vec<String>,
    /// Steps taken since the last reset.
    pub steps:     usize,
    /// Steps allowed before the run is aborted.
    pub max_steps: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(MAX_EXECUTION_STEPS)
    }
}

impl Context {
    /// Creates a context whose root scope holds the builtin functions.
    ///
    /// # Parameters
    /// - `max_steps`: The step ceiling for each run.
    #[must_use]
    pub fn new(max_steps: usize) -> Self {
        let mut env = Environment::new();
        for name in BUILTIN_FUNCTIONS {
            env.declare(ScopeId::ROOT,
                        name,
                        VariableBinding::new(Value::Function(FunctionValue::Builtin(name)),
                                             BindingMode::Let,
                                             Type::Function));
        }

        Self { env,
               output: Vec::new(),
               steps: 0,
               max_steps }
    }

    /// Counts one step and aborts once the ceiling is passed.
    ///
    /// Exactly `max_steps` steps succeed; the next one fails.
    pub(crate) fn tick(&mut self, line: usize) -> EvalResult<()> {
        self.steps += 1;
        if self.steps > self.max_steps {
            debug!(limit = self.max_steps, line, "step limit exceeded");
            return Err(RuntimeError::StepLimitExceeded { limit: self.max_steps,
                                                         line }.into());
        }
        Ok(())
    }

    /// Runs `f` in a fresh child scope of `parent` and releases the scope
    /// afterwards, whatever the outcome.
    pub(crate) fn with_scope<T>(&mut self,
                                parent: ScopeId,
                                f: impl FnOnce(&mut Self, ScopeId) -> EvalResult<T>)
                                -> EvalResult<T> {
        let scope = self.env.push(parent);
        let result = f(self, scope);
        self.env.truncate(scope);
        result
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Every call
    /// counts one step.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `scope`: Scope names are resolved in.
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Example
    /// ```
    /// use m87::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::{
    ///         evaluator::{core::Context, scope::ScopeId},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut context = Context::default();
    /// let expr = Expr::BinaryOp { left:  Box::new(Expr::Literal { value: 7.0.into(),
    ///                                                             line:  1, }),
    ///                             op:    BinaryOperator::Mod,
    ///                             right: Box::new(Expr::Literal { value: 4.0.into(),
    ///                                                             line:  1, }),
    ///                             line:  1, };
    ///
    /// assert_eq!(context.eval(&expr, ScopeId::ROOT).unwrap(), Value::Number(3.0));
    /// assert_eq!(context.steps, 3);
    /// ```
    pub fn eval(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Value> {
        let line = expr.line_number();
        self.tick(line)?;

        match expr {
            Expr::Literal { value, .. } => Ok(value.into()),
            Expr::Variable { name, .. } => self.read_variable(name, scope, line),
            Expr::UnaryOp { op, expr, .. } => self.eval_unary_op(*op, expr, scope, line),
            Expr::BinaryOp { left, op, right, .. } => {
                self.eval_binary_op(left, *op, right, scope, line)
            },
            Expr::Null { of, .. } => Ok(Value::Null(self.resolve_type(of, scope, line)?)),
            Expr::ArrayLiteral { elements, .. } => self.eval_array_literal(elements, scope, line),
            Expr::EmptyArray { element, .. } => {
                Ok(Value::Array { elements:     Vec::new(),
                                  element_type: self.resolve_type(element, scope, line)?, })
            },
            Expr::StructureRef { name, arguments, .. } => {
                self.create_struct(name, arguments, scope, line)
            },
            Expr::FunctionCall { callee, arguments, .. } => {
                self.eval_call(callee, arguments, scope, line)
            },
            Expr::MemberAccess { base,
                                 member,
                                 arguments,
                                 .. } => {
                self.eval_member(base, member, arguments.as_deref(), scope, line)
            },
            Expr::ArrayIndex { array, index, .. } => self.eval_index(array, index, scope, line),
            Expr::TypeConversion { expr, to, .. } => {
                let value = self.eval(expr, scope)?;
                let to = self.resolve_type(to, scope, line)?;
                convert_value(value, &to, line)
            },
            Expr::TypeValue { ty, .. } => Ok(Value::Type(self.resolve_type(ty, scope, line)?)),
        }
    }

    /// Executes a single statement.
    ///
    /// Every call counts one step.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `scope`: Scope the statement runs in.
    ///
    /// # Returns
    /// [`Flow::Returned`] if a `return` ran, otherwise [`Flow::Completed`].
    pub fn execute(&mut self, statement: &Statement, scope: ScopeId) -> EvalResult<Flow> {
        let line = statement.line_number();
        self.tick(line)?;

        match statement {
            Statement::VariableDeclaration { name,
                                             mode,
                                             declared,
                                             value,
                                             .. } => {
                let declared = self.resolve_type(declared, scope, line)?;
                let value = match value {
                    Some(expr) => Some(self.eval(expr, scope)?),
                    None => None,
                };
                self.env.add_variable(scope, name, value, *mode, declared, line)?;
            },
            Statement::Assignment { target, value, .. } => match target {
                Reference::Variable(name) => {
                    let expected = self.env.get_variable(scope, name, line)?.declared.clone();
                    let value = self.eval_for_type(value, &expected, scope)?;
                    self.env.modify_variable(scope, name, value, line)?;
                },
                Reference::Member(..) => self.assign_field(target, value, scope, line)?,
            },
            Statement::StructDeclaration { name, fields, .. } => {
                self.declare_struct(name, fields, scope)?;
            },
            Statement::StructCopy { name,
                                    source,
                                    add,
                                    delete,
                                    modify,
                                    .. } => {
                self.copy_struct(name, source, add, delete, modify, scope, line)?;
            },
            Statement::Function(def) => {
                let function = Value::Function(FunctionValue::User(def.clone()));
                self.env.declare(scope,
                                 &def.name,
                                 VariableBinding::new(function, BindingMode::Let, Type::Function));
            },
            Statement::IndexAssignment { array, index, value, .. } => {
                self.assign_index(array, index, value, scope, line)?;
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                let branch = if self.eval_condition(condition, scope)? {
                    then_branch
                } else if let Some(else_branch) = else_branch {
                    else_branch
                } else {
                    return Ok(Flow::Completed);
                };
                return self.with_scope(scope, |ctx, inner| ctx.execute_block(branch, inner));
            },
            Statement::While { condition, body, .. } => {
                while self.eval_condition(condition, scope)? {
                    let flow = self.with_scope(scope, |ctx, inner| ctx.execute_block(body, inner))?;
                    if let Flow::Returned(_) = flow {
                        return Ok(flow);
                    }
                }
            },
            Statement::For { names,
                             iterables,
                             body,
                             .. } => return self.execute_for(names, iterables, body, scope, line),
            Statement::Return { value, .. } => return Ok(Flow::Returned(self.eval(value, scope)?)),
            Statement::Expression { expr, .. } => {
                self.eval(expr, scope)?;
            },
        }

        Ok(Flow::Completed)
    }

    /// Executes statements in order until one returns.
    pub fn execute_block(&mut self, statements: &[Statement], scope: ScopeId) -> EvalResult<Flow> {
        for statement in statements {
            let flow = self.execute(statement, scope)?;
            if let Flow::Returned(_) = flow {
                return Ok(flow);
            }
        }
        Ok(Flow::Completed)
    }

    /// Reads a variable, following a reference slot back to the expression
    /// it stands for.
    fn read_variable(&mut self, name: &str, scope: ScopeId, line: usize) -> EvalResult<Value> {
        match &self.env.get_variable(scope, name, line)?.slot {
            Slot::Initialized(value) => Ok(value.clone()),
            Slot::Uninitialized => Err(RuntimeError::UninitializedValue { name: name.to_string(),
                                                                          line }.into()),
            Slot::Reference { expr, scope } => {
                let (expr, scope) = (expr.clone(), *scope);
                self.eval(&expr, scope)
            },
        }
    }

    /// Turns a written type into a runtime type.
    ///
    /// A struct name must be bound to a struct in scope.
    ///
    /// # Errors
    /// - `NotDefined` for an unknown struct name.
    /// - `TypeMismatch` if the name is bound to something else.
    pub(crate) fn resolve_type(&self,
                               ty: &TypeExpr,
                               scope: ScopeId,
                               line: usize)
                               -> Result<Type, RuntimeError> {
        Ok(match ty {
            TypeExpr::Number => Type::Number,
            TypeExpr::String => Type::String,
            TypeExpr::Boolean => Type::Boolean,
            TypeExpr::Void => Type::Void,
            TypeExpr::Type => Type::Type,
            TypeExpr::Function => Type::Function,
            TypeExpr::Array(inner) => Type::Array(Box::new(self.resolve_type(inner, scope, line)?)),
            TypeExpr::Optional(inner) => {
                Type::Optional(Box::new(self.resolve_type(inner, scope, line)?))
            },
            TypeExpr::Named(name) => match self.env.get_variable(scope, name, line)?.value() {
                Some(Value::Structure(data)) => Type::Structure(data.name.clone()),
                _ => {
                    return Err(RuntimeError::mismatch(format!("'{name}' is not a struct type"),
                                                      line));
                },
            },
        })
    }

    /// Evaluates a value headed for a slot of type `expected`.
    ///
    /// A bare `[]` takes its element type from the slot; anything else
    /// evaluates normally.
    pub(crate) fn eval_for_type(&mut self,
                                expr: &Expr,
                                expected: &Type,
                                scope: ScopeId)
                                -> EvalResult<Value> {
        if let Expr::ArrayLiteral { elements, line } = expr
           && elements.is_empty()
           && let Type::Array(element_type) = expected
        {
            self.tick(*line)?;
            return Ok(Value::Array { elements:     Vec::new(),
                                     element_type: element_type.as_ref().clone(), });
        }

        self.eval(expr, scope)
    }

    /// Evaluates a condition, which must be a boolean.
    fn eval_condition(&mut self, condition: &Expr, scope: ScopeId) -> EvalResult<bool> {
        match self.eval(condition, scope)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::mismatch(format!("a condition must be a boolean, found {}",
                                                        other.type_of()),
                                                condition.line_number()).into()),
        }
    }
}
