//! Visitor dispatch over declarations.
//!
//! See [`Declaration::accept`](super::Declaration::accept).

use std::sync::Arc;

use super::{
    ClassDescriptor, ConstructorDescriptor, FunctionDescriptor, ModuleDescriptor,
    PropertyDescriptor, TypeParameterDescriptor,
};

/// One method per declaration kind, threading `data` through.
pub trait DeclarationVisitor<D> {
    type Output;

    fn visit_module(&mut self, module: &Arc<ModuleDescriptor>, data: D) -> Self::Output;

    fn visit_class(&mut self, class: &Arc<ClassDescriptor>, data: D) -> Self::Output;

    fn visit_constructor(
        &mut self,
        constructor: &Arc<ConstructorDescriptor>,
        data: D,
    ) -> Self::Output;

    fn visit_function(&mut self, function: &Arc<FunctionDescriptor>, data: D) -> Self::Output;

    fn visit_property(&mut self, property: &Arc<PropertyDescriptor>, data: D) -> Self::Output;

    fn visit_type_parameter(
        &mut self,
        parameter: &Arc<TypeParameterDescriptor>,
        data: D,
    ) -> Self::Output;
}
