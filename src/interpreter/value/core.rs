use std::rc::Rc;

use crate::{
    ast::{FunctionDef, LiteralValue},
    interpreter::value::binding::VariableBinding,
    util::num::format_number,
};

/// A runtime type.
///
/// Types are nominal: two struct types are equal only if they share a name.
/// `optional(T)` accepts a bare `T` on assignment, see
/// [`can_assign`](crate::interpreter::value::convert::can_assign).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// `number`
    Number,
    /// `string`
    String,
    /// `boolean`
    Boolean,
    /// `void`
    Void,
    /// `type`
    Type,
    /// `function`
    Function,
    /// `array(T)`
    Array(Box<Self>),
    /// `optional(T)`
    Optional(Box<Self>),
    /// A struct type, named after its struct.
    Structure(String),
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
            Self::Void => write!(f, "void"),
            Self::Type => write!(f, "type"),
            Self::Function => write!(f, "function"),
            Self::Array(inner) => write!(f, "array({inner})"),
            Self::Optional(inner) => write!(f, "optional({inner})"),
            Self::Structure(name) => write!(f, "{name}"),
        }
    }
}

/// Whether a struct is a prototype or an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCase {
    /// Declared with `struct`. Its fields cannot be reassigned; it can only be
    /// derived from with `copy` or instantiated with `create`.
    Template,
    /// Produced by `copy` or `create`. Its `var` fields may be reassigned.
    Rebindable,
}

/// A struct value.
///
/// Fields keep their declaration order, which `create` relies on when
/// matching positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct StructData {
    /// The struct name.
    pub name:     String,
    /// Fields and methods in declaration order.
    pub fields:   Vec<(String, VariableBinding)>,
    /// Names of the templates this struct was copied from, oldest first.
    pub history:  Vec<String>,
    /// Template or rebindable.
    pub template: TemplateCase,
}

impl StructData {
    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&VariableBinding> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, b)| b)
    }

    /// Looks up a field by name for writing.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut VariableBinding> {
        self.fields.iter_mut().find(|(n, _)| n == name).map(|(_, b)| b)
    }

    /// Inserts a field, replacing any field with the same name in place.
    pub fn set_field(&mut self, name: &str, binding: VariableBinding) {
        if let Some(existing) = self.field_mut(name) {
            *existing = binding;
        } else {
            self.fields.push((name.to_string(), binding));
        }
    }

    /// Removes a field, returning whether it existed.
    pub fn remove_field(&mut self, name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|(n, _)| n != name);
        self.fields.len() != before
    }
}

/// A callable value.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionValue {
    /// A function declared with `fn`, either at statement level or as a
    /// struct method.
    User(Rc<FunctionDef>),
    /// A function provided by the interpreter, identified by name.
    Builtin(&'static str),
}

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible values that can appear in expressions,
/// bindings, function returns and conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string.
    Str(String),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A homogeneous array.
    Array {
        /// The elements.
        elements:     Vec<Self>,
        /// The type every element has.
        element_type: Type,
    },
    /// The absence of a value of the given type.
    Null(Type),
    /// A type used as a value.
    Type(Type),
    /// A struct template or instance.
    Structure(StructData),
    /// A function.
    Function(FunctionValue),
    /// The result of a function that returns nothing.
    Void,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Number(n) => (*n).into(),
            LiteralValue::Str(s) => s.as_str().into(),
            LiteralValue::Bool(b) => (*b).into(),
        }
    }
}

impl Value {
    /// Returns the runtime type of the value.
    ///
    /// A null of type `T` has type `optional(T)`.
    ///
    /// # Example
    /// ```
    /// use m87::interpreter::value::core::{Type, Value};
    ///
    /// assert_eq!(Value::Number(1.0).type_of(), Type::Number);
    /// assert_eq!(Value::Null(Type::Number).type_of(),
    ///            Type::Optional(Box::new(Type::Number)));
    /// ```
    #[must_use]
    pub fn type_of(&self) -> Type {
        match self {
            Self::Number(_) => Type::Number,
            Self::Str(_) => Type::String,
            Self::Bool(_) => Type::Boolean,
            Self::Array { element_type, .. } => Type::Array(Box::new(element_type.clone())),
            Self::Null(ty) => Type::Optional(Box::new(ty.clone())),
            Self::Type(_) => Type::Type,
            Self::Structure(data) => Type::Structure(data.name.clone()),
            Self::Function(_) => Type::Function,
            Self::Void => Type::Void,
        }
    }

    /// Builds an array of numbers.
    #[must_use]
    pub fn number_array(values: impl IntoIterator<Item = f64>) -> Self {
        Self::Array { elements:     values.into_iter().map(Self::Number).collect(),
                      element_type: Type::Number, }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Array { elements, .. } => {
                for (index, value) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                Ok(())
            },
            Self::Null(ty) => write!(f, "null({ty})"),
            Self::Type(ty) => write!(f, "{ty}"),
            Self::Structure(data) => write!(f, "struct {}", data.name),
            Self::Function(FunctionValue::User(def)) => write!(f, "function {}", def.name),
            Self::Function(FunctionValue::Builtin(name)) => write!(f, "function {name}"),
            Self::Void => write!(f, "void"),
        }
    }
}
