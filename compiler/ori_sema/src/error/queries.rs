//! Recognising sentinels after the fact.

use std::sync::Arc;

use super::ErrorSentinels;
use crate::descriptor::{Declaration, FunctionDescriptor, TypeParameterDescriptor};
use crate::types::{self, Type};

fn is_error_class(declaration: &Declaration) -> bool {
    matches!(declaration, Declaration::Class(class) if class.is_error())
}

/// Whether `declaration` is an error sentinel: an error class, a member of
/// one, or the error module itself.
///
/// Only one containment hop is checked. The module test is by identity, so
/// a module that merely shares the error module's name is not an error.
pub fn is_error(declaration: &Declaration) -> bool {
    if is_error_class(declaration) {
        return true;
    }
    if declaration
        .containing_declaration()
        .is_some_and(|container| is_error_class(&container))
    {
        return true;
    }
    matches!(
        declaration,
        Declaration::Module(module) if Arc::ptr_eq(module, ErrorSentinels::global().error_module())
    )
}

/// Whether an error type occurs in `ty` or, recursively, in any of its
/// non-star arguments.
#[inline]
pub fn contains_error_type(ty: &Type) -> bool {
    ty.flags().has_errors()
}

/// Whether any type in the signature of `function` contains an error type.
///
/// Checks the return type, the extension receiver, each value parameter,
/// then the upper bounds of each type parameter. A return type that is not
/// yet known counts as clean.
pub fn function_contains_error_type(function: &FunctionDescriptor) -> bool {
    if function.return_type().is_some_and(contains_error_type) {
        return true;
    }
    if function
        .extension_receiver_parameter()
        .is_some_and(|receiver| contains_error_type(receiver.ty()))
    {
        return true;
    }
    if function
        .value_parameters()
        .iter()
        .any(|parameter| contains_error_type(parameter.ty()))
    {
        return true;
    }
    function
        .type_parameters()
        .iter()
        .flat_map(|parameter| parameter.upper_bounds())
        .any(contains_error_type)
}

/// Whether `ty` is the stand-in for an uninferred type parameter.
#[inline]
pub fn is_uninferred_parameter(ty: &Type) -> bool {
    ty.constructor().as_uninferred_parameter().is_some()
}

/// Whether an uninferred-parameter type occurs anywhere in `ty`.
pub fn contains_uninferred_parameter(ty: &Type) -> bool {
    if !ty.flags().has_uninferred() {
        return false;
    }
    types::contains(ty, &is_uninferred_parameter)
}

/// The type parameter that could not be inferred, if `ty` stands in for
/// one.
pub fn uninferred_type_parameter(ty: &Type) -> Option<&Arc<TypeParameterDescriptor>> {
    ty.constructor()
        .as_uninferred_parameter()
        .map(|constructor| constructor.type_parameter())
}
