use std::collections::HashMap;

use crate::{
    ast::BindingMode,
    error::RuntimeError,
    interpreter::value::{
        binding::{Slot, VariableBinding},
        convert::can_assign,
        core::{Type, Value},
    },
};

/// Index of a scope inside an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The outermost scope, holding builtins and top-level declarations.
    pub const ROOT: Self = Self(0);
}

/// One scope: its own bindings and the scope lookups continue in.
#[derive(Debug, Default)]
struct Frame {
    variables: HashMap<String, VariableBinding>,
    parent:    Option<ScopeId>,
}

/// An arena of scopes.
///
/// Scopes are pushed when a block, loop iteration or call starts and
/// truncated when it ends, so they are always released in reverse order of
/// creation. A scope's parent is an index into the same arena.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only the empty root scope.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::default()] }
    }

    /// Opens a new scope whose lookups fall back to `parent`.
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        self.frames.push(Frame { variables: HashMap::new(),
                                 parent:    Some(parent), });
        ScopeId(self.frames.len() - 1)
    }

    /// Drops `scope` and every scope opened after it. The root is never
    /// dropped.
    pub fn truncate(&mut self, scope: ScopeId) {
        self.frames.truncate(scope.0.max(1));
    }

    /// The number of live scopes, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Finds the binding for `name`, starting in `scope` and walking up its
    /// parents.
    #[must_use]
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&VariableBinding> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let frame = self.frames.get(id.0)?;
            if let Some(binding) = frame.variables.get(name) {
                return Some(binding);
            }
            current = frame.parent;
        }
        None
    }

    /// Like [`lookup`](Self::lookup), for writing.
    pub fn lookup_mut(&mut self, scope: ScopeId, name: &str) -> Option<&mut VariableBinding> {
        let mut current = Some(scope);
        let mut owner = None;
        while let Some(id) = current {
            let frame = self.frames.get(id.0)?;
            if frame.variables.contains_key(name) {
                owner = Some(id);
                break;
            }
            current = frame.parent;
        }

        self.frames.get_mut(owner?.0)?.variables.get_mut(name)
    }

    /// Binds `name` in `scope` without any checks, replacing an existing
    /// binding of the same scope.
    pub fn declare(&mut self, scope: ScopeId, name: &str, binding: VariableBinding) {
        if let Some(frame) = self.frames.get_mut(scope.0) {
            frame.variables.insert(name.to_string(), binding);
        }
    }

    /// Removes `name` from `scope` itself, without looking at parents.
    pub fn remove(&mut self, scope: ScopeId, name: &str) -> Option<VariableBinding> {
        self.frames.get_mut(scope.0)?.variables.remove(name)
    }

    /// Declares a variable in `scope`.
    ///
    /// A value, if given, must be assignable to `declared`. Redeclaring a
    /// name in the same scope replaces the old binding.
    ///
    /// # Errors
    /// - `TypeMismatch` if the value does not fit the declared type.
    ///
    /// # Example
    /// ```
    /// use m87::{
    ///     ast::BindingMode,
    ///     error::RuntimeError,
    ///     interpreter::{
    ///         evaluator::scope::{Environment, ScopeId},
    ///         value::core::{Type, Value},
    ///     },
    /// };
    ///
    /// let mut env = Environment::new();
    /// env.add_variable(ScopeId::ROOT,
    ///                  "x",
    ///                  Some(Value::Number(1.0)),
    ///                  BindingMode::Var,
    ///                  Type::Number,
    ///                  1)
    ///    .unwrap();
    ///
    /// let err = env.add_variable(ScopeId::ROOT,
    ///                            "y",
    ///                            Some(Value::Str("a".into())),
    ///                            BindingMode::Let,
    ///                            Type::Number,
    ///                            2)
    ///              .unwrap_err();
    /// assert!(matches!(err, RuntimeError::TypeMismatch { line: 2, .. }));
    /// ```
    pub fn add_variable(&mut self,
                        scope: ScopeId,
                        name: &str,
                        value: Option<Value>,
                        mode: BindingMode,
                        declared: Type,
                        line: usize)
                        -> Result<(), RuntimeError> {
        let binding = match value {
            Some(value) => {
                check_assignable(name, &declared, &value, line)?;
                VariableBinding::new(value, mode, declared)
            },
            None => VariableBinding::uninitialized(mode, declared),
        };

        self.declare(scope, name, binding);
        Ok(())
    }

    /// Reassigns an existing variable.
    ///
    /// # Errors
    /// - `NotDefined` if no enclosing scope binds `name`.
    /// - `MutatedLet` if the binding was declared with `let`.
    /// - `TypeMismatch` if the value does not fit the declared type.
    pub fn modify_variable(&mut self,
                           scope: ScopeId,
                           name: &str,
                           value: Value,
                           line: usize)
                           -> Result<(), RuntimeError> {
        let binding =
            self.lookup_mut(scope, name)
                .ok_or_else(|| RuntimeError::NotDefined { name: name.to_string(),
                                                          line })?;

        if binding.mode == BindingMode::Let {
            return Err(RuntimeError::MutatedLet { name: name.to_string(),
                                                  line });
        }
        check_assignable(name, &binding.declared, &value, line)?;

        binding.slot = Slot::Initialized(value);
        Ok(())
    }

    /// Looks up a binding, failing if the name is unknown.
    ///
    /// # Errors
    /// - `NotDefined` if no enclosing scope binds `name`.
    pub fn get_variable(&self,
                        scope: ScopeId,
                        name: &str,
                        line: usize)
                        -> Result<&VariableBinding, RuntimeError> {
        self.lookup(scope, name)
            .ok_or_else(|| RuntimeError::NotDefined { name: name.to_string(),
                                                      line })
    }
}

fn check_assignable(name: &str,
                    declared: &Type,
                    value: &Value,
                    line: usize)
                    -> Result<(), RuntimeError> {
    let actual = value.type_of();
    if can_assign(declared, &actual) {
        Ok(())
    } else {
        Err(RuntimeError::mismatch(format!("'{name}' is declared as {declared} but was given \
                                            {actual}"),
                                   line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_parents() {
        let mut env = Environment::new();
        env.declare(ScopeId::ROOT,
                    "x",
                    VariableBinding::new(Value::Number(1.0), BindingMode::Let, Type::Number));
        let child = env.push(ScopeId::ROOT);
        let grandchild = env.push(child);

        assert!(env.lookup(grandchild, "x").is_some());
        assert!(env.lookup(grandchild, "y").is_none());
    }

    #[test]
    fn inner_binding_shadows_outer() {
        let mut env = Environment::new();
        env.declare(ScopeId::ROOT,
                    "x",
                    VariableBinding::new(Value::Number(1.0), BindingMode::Var, Type::Number));
        let child = env.push(ScopeId::ROOT);
        env.declare(child,
                    "x",
                    VariableBinding::new(Value::Number(2.0), BindingMode::Var, Type::Number));

        env.modify_variable(child, "x", Value::Number(3.0), 1).unwrap();

        assert_eq!(env.lookup(child, "x").and_then(VariableBinding::value),
                   Some(&Value::Number(3.0)));
        assert_eq!(env.lookup(ScopeId::ROOT, "x").and_then(VariableBinding::value),
                   Some(&Value::Number(1.0)));
    }

    #[test]
    fn truncate_releases_child_scopes() {
        let mut env = Environment::new();
        let child = env.push(ScopeId::ROOT);
        env.push(child);

        env.truncate(child);
        assert_eq!(env.depth(), 1);

        env.truncate(ScopeId::ROOT);
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn let_binding_cannot_change() {
        let mut env = Environment::new();
        env.add_variable(ScopeId::ROOT,
                         "x",
                         Some(Value::Number(1.0)),
                         BindingMode::Let,
                         Type::Number,
                         1)
           .unwrap();

        assert_eq!(env.modify_variable(ScopeId::ROOT, "x", Value::Number(2.0), 4),
                   Err(RuntimeError::MutatedLet { name: "x".into(),
                                                  line: 4, }));
    }

    #[test]
    fn optional_accepts_bare_value() {
        let mut env = Environment::new();
        let optional = Type::Optional(Box::new(Type::Number));
        env.add_variable(ScopeId::ROOT,
                         "x",
                         Some(Value::Null(Type::Number)),
                         BindingMode::Var,
                         optional,
                         1)
           .unwrap();

        assert!(env.modify_variable(ScopeId::ROOT, "x", Value::Number(5.0), 2).is_ok());
        assert!(matches!(env.modify_variable(ScopeId::ROOT, "x", Value::Str("a".into()), 3),
                         Err(RuntimeError::TypeMismatch { line: 3, .. })));
    }

    #[test]
    fn unknown_name_is_not_defined() {
        let env = Environment::new();
        assert_eq!(env.get_variable(ScopeId::ROOT, "nope", 7),
                   Err(RuntimeError::NotDefined { name: "nope".into(),
                                                  line: 7, }));
    }
}
