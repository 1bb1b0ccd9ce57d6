use crate::{
    ast::{BindingMode, Expr},
    interpreter::{
        evaluator::scope::ScopeId,
        value::core::{Type, Value},
    },
};

/// What a binding currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Declared without a value, e.g. `var x: number`.
    Uninitialized,
    /// Holds a value.
    Initialized(Value),
    /// Stands for another binding. Reading it re-evaluates `expr` in `scope`;
    /// this is how `self` inside a method sees the struct it was called on.
    Reference {
        /// The expression the method was called on.
        expr:  Expr,
        /// The scope the expression is resolved in.
        scope: ScopeId,
    },
}

/// A name's entry in a scope or a struct's field list.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBinding {
    /// The stored value.
    pub slot:     Slot,
    /// `let` or `var`.
    pub mode:     BindingMode,
    /// The type every write is checked against.
    pub declared: Type,
}

impl VariableBinding {
    /// A binding that holds a value.
    #[must_use]
    pub const fn new(value: Value, mode: BindingMode, declared: Type) -> Self {
        Self { slot: Slot::Initialized(value),
               mode,
               declared }
    }

    /// A binding declared without a value.
    #[must_use]
    pub const fn uninitialized(mode: BindingMode, declared: Type) -> Self {
        Self { slot: Slot::Uninitialized,
               mode,
               declared }
    }

    /// Returns the value if the binding holds one directly.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match &self.slot {
            Slot::Initialized(value) => Some(value),
            _ => None,
        }
    }
}
