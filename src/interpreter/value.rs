/// Runtime values and types.
///
/// Defines `Value`, the nominal `Type` system, struct instances and function
/// values, together with their display forms.
pub mod core;
/// Variable bindings.
///
/// Defines what a scope stores for each name: the value slot, whether it may
/// be reassigned, and the declared type that guards every write.
pub mod binding;
/// Type compatibility and `convert`.
///
/// Implements the one-way `optional(T)` widening rule and the conversions
/// allowed between strings, numbers, booleans and arrays of them.
pub mod convert;
