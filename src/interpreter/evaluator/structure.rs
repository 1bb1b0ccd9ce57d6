use std::rc::Rc;

use crate::{
    ast::{BindingMode, Expr, FieldDecl, FunctionDef, Reference},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::ScopeId,
        },
        value::{
            binding::{Slot, VariableBinding},
            convert::can_assign,
            core::{FunctionValue, StructData, TemplateCase, Type, Value},
        },
    },
};

impl Context {
    /// Declares a struct template.
    ///
    /// Field initializers are evaluated now, in `scope`, and checked against
    /// their declared types. Methods are stored as function values. The
    /// template is bound with `let` under its own name.
    ///
    /// # Errors
    /// `TypeMismatch` if a field initializer does not fit its type.
    pub(crate) fn declare_struct(&mut self,
                                 name: &str,
                                 fields: &[FieldDecl],
                                 scope: ScopeId)
                                 -> EvalResult<()> {
        let fields = fields.iter()
                           .map(|field| self.build_field(field, scope))
                           .collect::<EvalResult<Vec<_>>>()?;

        let data = StructData { name: name.to_string(),
                                fields,
                                history: Vec::new(),
                                template: TemplateCase::Template };
        self.env.declare(scope,
                         name,
                         VariableBinding::new(Value::Structure(data),
                                              BindingMode::Let,
                                              Type::Structure(name.to_string())));
        Ok(())
    }

    /// Derives a new struct from a template.
    ///
    /// The copy records `source` in its history. Its `add` clause inserts
    /// fields, `delete` removes them and `modify` replaces existing ones,
    /// applied in that order.
    ///
    /// # Errors
    /// - `TypeMismatch` if `source` is not a template struct.
    /// - `NotDefined` if `delete` or `modify` names a missing field.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn copy_struct(&mut self,
                              name: &str,
                              source: &str,
                              add: &[FieldDecl],
                              delete: &[String],
                              modify: &[FieldDecl],
                              scope: ScopeId,
                              line: usize)
                              -> EvalResult<()> {
        let mut data = match self.env.get_variable(scope, source, line)?.value() {
            Some(Value::Structure(data)) if data.template == TemplateCase::Template => data.clone(),
            _ => {
                return Err(RuntimeError::mismatch(format!("'{source}' is not a struct template"),
                                                  line).into());
            },
        };

        data.name = name.to_string();
        data.history.push(source.to_string());
        data.template = TemplateCase::Rebindable;

        for field in add {
            let (field_name, binding) = self.build_field(field, scope)?;
            data.set_field(&field_name, binding);
        }
        for field_name in delete {
            if !data.remove_field(field_name) {
                return Err(RuntimeError::NotDefined { name: format!("{source}.{field_name}"),
                                                      line }.into());
            }
        }
        for field in modify {
            if data.field(field.name()).is_none() {
                return Err(RuntimeError::NotDefined { name: format!("{source}.{}", field.name()),
                                                      line }.into());
            }
            let (field_name, binding) = self.build_field(field, scope)?;
            data.set_field(&field_name, binding);
        }

        self.env.declare(scope,
                         name,
                         VariableBinding::new(Value::Structure(data),
                                              BindingMode::Var,
                                              Type::Structure(name.to_string())));
        Ok(())
    }

    /// Evaluates `create Name(args)`.
    ///
    /// Without arguments every field keeps its default. Otherwise there must
    /// be one argument per data field; methods are skipped.
    ///
    /// # Errors
    /// - `NotDefined` if `name` is unknown.
    /// - `TypeMismatch` if `name` is not a struct or an argument does not fit
    ///   its field.
    /// - `ArgumentCountMismatch` if the argument count is wrong.
    pub(crate) fn create_struct(&mut self,
                                name: &str,
                                arguments: &[Expr],
                                scope: ScopeId,
                                line: usize)
                                -> EvalResult<Value> {
        let Some(Value::Structure(data)) = self.env.get_variable(scope, name, line)?.value() else {
            return Err(RuntimeError::mismatch(format!("cannot create '{name}', it is not a struct"),
                                              line).into());
        };
        let mut data = data.clone();
        data.template = TemplateCase::Rebindable;

        if arguments.is_empty() {
            return Ok(Value::Structure(data));
        }

        let data_fields = data.fields
                              .iter()
                              .filter(|(_, b)| b.declared != Type::Function)
                              .count();
        if arguments.len() != data_fields {
            return Err(RuntimeError::ArgumentCountMismatch { expected: data_fields,
                                                             found: arguments.len(),
                                                             line }.into());
        }

        let mut arguments = arguments.iter();
        for (field_name, binding) in &mut data.fields {
            if binding.declared == Type::Function {
                continue;
            }
            let Some(arg) = arguments.next() else { break };

            let value = self.eval_for_type(arg, &binding.declared, scope)?;
            let actual = value.type_of();
            if !can_assign(&binding.declared, &actual) {
                return Err(RuntimeError::mismatch(format!("field '{field_name}' of {name} is \
                                                           declared as {} but was given \
                                                           {actual}",
                                                          binding.declared),
                                                  line).into());
            }
            binding.slot = Slot::Initialized(value);
        }

        Ok(Value::Structure(data))
    }

    /// Evaluates `base.member` or, with arguments, `base.member(args)`.
    ///
    /// # Errors
    /// - `TypeMismatch` if `base` is not a struct, or a called member is not
    ///   a method.
    /// - `NotDefined` if the member does not exist.
    /// - `UninitializedValue` if the field has no value yet.
    pub(crate) fn eval_member(&mut self,
                              base: &Expr,
                              member: &str,
                              arguments: Option<&[Expr]>,
                              scope: ScopeId,
                              line: usize)
                              -> EvalResult<Value> {
        let Value::Structure(data) = self.eval(base, scope)? else {
            return Err(RuntimeError::mismatch(format!("cannot read '{member}' from a value that \
                                                       is not a struct"),
                                              line).into());
        };

        let binding = data.field(member)
                          .ok_or_else(|| RuntimeError::NotDefined { name: format!("{}.{member}",
                                                                                  data.name),
                                                                    line })?;

        let value = match &binding.slot {
            Slot::Initialized(value) => value.clone(),
            Slot::Uninitialized | Slot::Reference { .. } => {
                return Err(RuntimeError::UninitializedValue { name: format!("{}.{member}",
                                                                            data.name),
                                                              line }.into());
            },
        };

        let Some(arguments) = arguments else {
            return Ok(value);
        };

        match value {
            Value::Function(FunctionValue::User(def)) => {
                self.call_method(&def, &data, base, arguments, scope, line)
            },
            other => Err(RuntimeError::mismatch(format!("{}.{member} is {}, not a method",
                                                        data.name,
                                                        other.type_of()),
                                                line).into()),
        }
    }

    /// Calls a method of `data`.
    ///
    /// The arguments are evaluated in the calling scope. The method body
    /// sees a copy of every field of the struct and a `self` that refers
    /// back to `base`, so writes through `self` reach the original.
    fn call_method(&mut self,
                   def: &Rc<FunctionDef>,
                   data: &StructData,
                   base: &Expr,
                   arguments: &[Expr],
                   scope: ScopeId,
                   line: usize)
                   -> EvalResult<Value> {
        let args = self.eval_arguments(def, arguments, scope, line)?;

        let mut extra = data.fields.clone();
        extra.push(("self".to_string(),
                    VariableBinding { slot:     Slot::Reference { expr: base.clone(),
                                                                  scope },
                                      mode:     BindingMode::Let,
                                      declared: Type::Structure(data.name.clone()), }));

        self.call_with_bindings(def, args, extra, scope, line)
    }

    /// Executes `a.b.c = value`.
    ///
    /// The value is evaluated first. The field path is then walked on a copy
    /// of the root variable, which is written back with the usual checks for
    /// a variable. A `self` root is followed back to the variable the method
    /// was called on.
    ///
    /// # Errors
    /// - `MutatedNonBindable` if a template struct is on the path, or `self`
    ///   refers to something that cannot be assigned.
    /// - `MutatedLet` if the field or the root variable was declared with
    ///   `let`.
    /// - `TypeMismatch` if the value does not fit the field.
    /// - `NotDefined` if a field on the path does not exist.
    pub(crate) fn assign_field(&mut self,
                               target: &Reference,
                               value: &Expr,
                               scope: ScopeId,
                               line: usize)
                               -> EvalResult<()> {
        let expected = self.field_type(target, scope, line);
        let value = match expected {
            Some(expected) => self.eval_for_type(value, &expected, scope)?,
            None => self.eval(value, scope)?,
        };

        let (owner, root, path) = self.resolve_target(target, scope, line)?;

        let binding = self.env.get_variable(owner, &root, line)?;
        let mut root_value = match &binding.slot {
            Slot::Initialized(value) => value.clone(),
            Slot::Uninitialized => {
                return Err(RuntimeError::UninitializedValue { name: root, line }.into());
            },
            Slot::Reference { .. } => {
                return Err(RuntimeError::MutatedNonBindable { name: root, line }.into());
            },
        };

        write_path(&mut root_value, &path, value, line)?;
        self.env.modify_variable(owner, &root, root_value, line)?;
        Ok(())
    }

    /// Finds the variable an assignment target really writes to.
    ///
    /// Returns the scope to write in, the variable name and the field path
    /// below it. `self` bindings are replaced by the expression they refer to
    /// until a plain variable remains.
    fn resolve_target(&self,
                      target: &Reference,
                      scope: ScopeId,
                      line: usize)
                      -> Result<(ScopeId, String, Vec<String>), RuntimeError> {
        let mut scope = scope;
        let mut root = target.root().to_string();
        let mut path = target.path()
                             .into_iter()
                             .map(str::to_string)
                             .collect::<Vec<_>>();

        loop {
            let binding = self.env.get_variable(scope, &root, line)?;
            let Slot::Reference { expr, scope: origin } = &binding.slot else {
                break;
            };
            let Some(reference) = expr.as_reference() else {
                return Err(RuntimeError::MutatedNonBindable { name: root, line });
            };

            let mut full_path = reference.path()
                                         .into_iter()
                                         .map(str::to_string)
                                         .collect::<Vec<_>>();
            full_path.append(&mut path);

            path = full_path;
            root = reference.root().to_string();
            scope = *origin;
        }

        Ok((scope, root, path))
    }

    /// The declared type of the field an assignment writes to, if it can be
    /// found without errors.
    fn field_type(&self, target: &Reference, scope: ScopeId, line: usize) -> Option<Type> {
        let (owner, root, path) = self.resolve_target(target, scope, line).ok()?;
        let mut value = self.env.lookup(owner, &root)?.value()?;
        let (last, parents) = path.split_last()?;

        for field in parents {
            let Value::Structure(data) = value else { return None };
            value = data.field(field)?.value()?;
        }

        let Value::Structure(data) = value else { return None };
        Some(data.field(last)?.declared.clone())
    }

    /// Turns a field declaration into a named binding, evaluating its
    /// initializer in `scope`.
    fn build_field(&mut self,
                   field: &FieldDecl,
                   scope: ScopeId)
                   -> EvalResult<(String, VariableBinding)> {
        match field {
            FieldDecl::Value { name,
                               mode,
                               declared,
                               value,
                               line, } => {
                let declared = self.resolve_type(declared, scope, *line)?;
                let binding = match value {
                    Some(expr) => {
                        let value = self.eval_for_type(expr, &declared, scope)?;
                        let actual = value.type_of();
                        if !can_assign(&declared, &actual) {
                            return Err(RuntimeError::mismatch(format!("field '{name}' is declared \
                                                                       as {declared} but was \
                                                                       given {actual}"),
                                                              *line).into());
                        }
                        VariableBinding::new(value, *mode, declared)
                    },
                    None => VariableBinding::uninitialized(*mode, declared),
                };
                Ok((name.clone(), binding))
            },
            FieldDecl::Method(def) => {
                Ok((def.name.clone(),
                    VariableBinding::new(Value::Function(FunctionValue::User(def.clone())),
                                         BindingMode::Let,
                                         Type::Function)))
            },
        }
    }
}

/// Writes `new` into the field at `path` inside `value`.
fn write_path(value: &mut Value,
              path: &[String],
              new: Value,
              line: usize)
              -> Result<(), RuntimeError> {
    let Value::Structure(data) = value else {
        let details = format!("cannot assign to a field of {}", value.type_of());
        return Err(RuntimeError::mismatch(details, line));
    };
    if data.template == TemplateCase::Template {
        return Err(RuntimeError::MutatedNonBindable { name: data.name.clone(),
                                                      line });
    }

    let Some((field, rest)) = path.split_first() else {
        return Err(RuntimeError::general("assignment without a field", line));
    };
    let qualified = format!("{}.{field}", data.name);
    let Some(binding) = data.field_mut(field) else {
        return Err(RuntimeError::NotDefined { name: qualified,
                                              line });
    };

    if !rest.is_empty() {
        return match &mut binding.slot {
            Slot::Initialized(inner) => write_path(inner, rest, new, line),
            _ => Err(RuntimeError::UninitializedValue { name: qualified,
                                                        line }),
        };
    }

    if binding.mode == BindingMode::Let {
        return Err(RuntimeError::MutatedLet { name: qualified,
                                              line });
    }
    let actual = new.type_of();
    if !can_assign(&binding.declared, &actual) {
        return Err(RuntimeError::mismatch(format!("field '{field}' is declared as {} but was \
                                                   given {actual}",
                                                  binding.declared),
                                          line));
    }

    binding.slot = Slot::Initialized(new);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{interpreter::lexer::tokenize, interpreter::parser::statement::parse_program};

    fn run(source: &str) -> Context {
        let tokens = tokenize(source).unwrap();
        let program = parse_program(&tokens).unwrap();
        let mut context = Context::default();
        context.execute_block(&program, ScopeId::ROOT).unwrap();
        context
    }

    fn structure(context: &Context, name: &str) -> StructData {
        match context.env.lookup(ScopeId::ROOT, name).and_then(VariableBinding::value) {
            Some(Value::Structure(data)) => data.clone(),
            other => panic!("expected a struct, found {other:?}"),
        }
    }

    #[test]
    fn copies_record_their_history() {
        let context = run("struct A {\nvar x: number = 1\n}\n\
                           copy B from A\nadd {\nvar y: number = 2\n}");

        let a = structure(&context, "A");
        assert_eq!(a.template, TemplateCase::Template);
        assert!(a.history.is_empty());

        let b = structure(&context, "B");
        assert_eq!(b.template, TemplateCase::Rebindable);
        assert_eq!(b.history, vec!["A".to_string()]);
        assert_eq!(b.fields.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(), ["x", "y"]);
    }

    #[test]
    fn create_fills_data_fields_in_order() {
        let context = run("struct P {\nvar a: number = 0\nfn f() {\n}\nvar b: string = \"\"\n}\n\
                           var p: P = create P(1, \"two\")");

        let p = structure(&context, "p");
        assert_eq!(p.template, TemplateCase::Rebindable);
        assert_eq!(p.field("a").and_then(VariableBinding::value), Some(&Value::Number(1.0)));
        assert_eq!(p.field("b").and_then(VariableBinding::value), Some(&Value::Str("two".into())));
    }
}
