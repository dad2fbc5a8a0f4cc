//! Declaration descriptors.
//!
//! The descriptor hierarchy is a closed set: [`Declaration`] wraps every
//! kind behind an `Arc` so declarations can be shared across passes and
//! threads. Each descriptor is immutable once built.
//!
//! Containment edges point upward (class → module, function → class).
//! Where a parent also owns the child (a class and its constructor, a
//! generic declaration and its type parameters), the child holds a weak
//! [`DeclarationLink`] so the pair does not leak.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::builtins::BuiltIns;
use crate::name::Name;

mod callable;
mod class;
mod module;
mod type_parameter;
mod visitor;

pub use callable::{
    ConstructorDescriptor, FunctionBuilder, FunctionDescriptor, PropertyDescriptor,
    ReceiverParameterDescriptor, ValueParameterDescriptor,
};
pub use class::{ClassBuilder, ClassDescriptor};
pub(crate) use class::{ClassLink, ClassOrigin};
pub use module::{
    ImportPath, ModuleCapability, ModuleDescriptor, PackageViewDescriptor, PlatformClassMap,
};
pub use type_parameter::TypeParameterDescriptor;
pub use visitor::DeclarationVisitor;

/// Inheritance modality of a class or member.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Modality {
    Final,
    Sealed,
    Open,
    Abstract,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClassKind {
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    Object,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Visibility {
    Private,
    Protected,
    Internal,
    Public,
    Local,
}

/// Declaration-site or use-site variance.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variance {
    Invariant,
    In,
    Out,
}

impl Variance {
    /// Keyword as written in source; empty for invariant.
    pub const fn label(self) -> &'static str {
        match self {
            Variance::Invariant => "",
            Variance::In => "in",
            Variance::Out => "out",
        }
    }
}

/// Annotation storage.
///
/// Annotation resolution lives outside the semantic model, so every
/// descriptor built here carries [`Annotations::EMPTY`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Annotations {
    _private: (),
}

impl Annotations {
    pub const EMPTY: Annotations = Annotations { _private: () };

    #[inline]
    pub const fn is_empty(self) -> bool {
        true
    }
}

/// Where a declaration came from.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SourceElement {
    /// Synthesized by the compiler (all error sentinels).
    NoSource,
    File { path: Arc<str>, offset: u32 },
}

/// Upward link from a declaration to its container.
#[derive(Clone)]
pub(crate) enum DeclarationLink {
    Strong(Declaration),
    /// The container owns this declaration.
    Class(Weak<ClassDescriptor>),
    /// The container owns this declaration.
    Function(Weak<FunctionDescriptor>),
}

impl DeclarationLink {
    pub(crate) fn get(&self) -> Option<Declaration> {
        match self {
            DeclarationLink::Strong(declaration) => Some(declaration.clone()),
            DeclarationLink::Class(class) => class.upgrade().map(Declaration::Class),
            DeclarationLink::Function(function) => function.upgrade().map(Declaration::Function),
        }
    }
}

/// Any declaration descriptor.
#[derive(Clone)]
pub enum Declaration {
    Module(Arc<ModuleDescriptor>),
    Class(Arc<ClassDescriptor>),
    Constructor(Arc<ConstructorDescriptor>),
    Function(Arc<FunctionDescriptor>),
    Property(Arc<PropertyDescriptor>),
    TypeParameter(Arc<TypeParameterDescriptor>),
}

impl Declaration {
    pub fn name(&self) -> Name {
        match self {
            Declaration::Module(module) => module.name().clone(),
            Declaration::Class(class) => class.name().clone(),
            Declaration::Constructor(_) => Name::special("<init>"),
            Declaration::Function(function) => function.name().clone(),
            Declaration::Property(property) => property.name().clone(),
            Declaration::TypeParameter(parameter) => parameter.name().clone(),
        }
    }

    /// The declaration this one is nested in. Modules have none.
    pub fn containing_declaration(&self) -> Option<Declaration> {
        match self {
            Declaration::Module(_) => None,
            Declaration::Class(class) => Some(class.containing_declaration().clone()),
            Declaration::Constructor(constructor) => constructor
                .containing_declaration()
                .map(Declaration::Class),
            Declaration::Function(function) => Some(function.containing_declaration().clone()),
            Declaration::Property(property) => Some(property.containing_declaration().clone()),
            Declaration::TypeParameter(parameter) => parameter.containing_declaration(),
        }
    }

    /// Descriptors here are never substituted copies.
    pub fn original(&self) -> Declaration {
        self.clone()
    }

    /// The module this declaration lives in.
    pub fn module(&self) -> Option<Arc<ModuleDescriptor>> {
        let mut current = self.clone();
        loop {
            if let Declaration::Module(module) = &current {
                return Some(Arc::clone(module));
            }
            current = current.containing_declaration()?;
        }
    }

    pub fn builtins(&self) -> &'static BuiltIns {
        self.module()
            .map_or_else(BuiltIns::default_instance, |module| module.builtins())
    }

    /// Reference identity.
    pub fn ptr_eq(&self, other: &Declaration) -> bool {
        match (self, other) {
            (Declaration::Module(a), Declaration::Module(b)) => Arc::ptr_eq(a, b),
            (Declaration::Class(a), Declaration::Class(b)) => Arc::ptr_eq(a, b),
            (Declaration::Constructor(a), Declaration::Constructor(b)) => Arc::ptr_eq(a, b),
            (Declaration::Function(a), Declaration::Function(b)) => Arc::ptr_eq(a, b),
            (Declaration::Property(a), Declaration::Property(b)) => Arc::ptr_eq(a, b),
            (Declaration::TypeParameter(a), Declaration::TypeParameter(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Dispatch to the matching `visit_*` method.
    ///
    /// The error module takes no part in visiting and yields `None`.
    pub fn accept<D, V: DeclarationVisitor<D>>(
        &self,
        visitor: &mut V,
        data: D,
    ) -> Option<V::Output> {
        match self {
            Declaration::Module(module) => {
                if module.is_error_module() {
                    None
                } else {
                    Some(visitor.visit_module(module, data))
                }
            }
            Declaration::Class(class) => Some(visitor.visit_class(class, data)),
            Declaration::Constructor(constructor) => {
                Some(visitor.visit_constructor(constructor, data))
            }
            Declaration::Function(function) => Some(visitor.visit_function(function, data)),
            Declaration::Property(property) => Some(visitor.visit_property(property, data)),
            Declaration::TypeParameter(parameter) => {
                Some(visitor.visit_type_parameter(parameter, data))
            }
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Declaration::Module(_) => "Module",
            Declaration::Class(_) => "Class",
            Declaration::Constructor(_) => "Constructor",
            Declaration::Function(_) => "Function",
            Declaration::Property(_) => "Property",
            Declaration::TypeParameter(_) => "TypeParameter",
        };
        write!(f, "{kind}({})", self.name())
    }
}

impl From<Arc<ModuleDescriptor>> for Declaration {
    fn from(module: Arc<ModuleDescriptor>) -> Self {
        Declaration::Module(module)
    }
}

impl From<Arc<ClassDescriptor>> for Declaration {
    fn from(class: Arc<ClassDescriptor>) -> Self {
        Declaration::Class(class)
    }
}

impl From<Arc<FunctionDescriptor>> for Declaration {
    fn from(function: Arc<FunctionDescriptor>) -> Self {
        Declaration::Function(function)
    }
}

impl From<Arc<PropertyDescriptor>> for Declaration {
    fn from(property: Arc<PropertyDescriptor>) -> Self {
        Declaration::Property(property)
    }
}

impl From<Arc<TypeParameterDescriptor>> for Declaration {
    fn from(parameter: Arc<TypeParameterDescriptor>) -> Self {
        Declaration::TypeParameter(parameter)
    }
}

/// A declaration that can be referred to by a type: a class or a type
/// parameter.
#[derive(Clone)]
pub enum Classifier {
    Class(Arc<ClassDescriptor>),
    TypeParameter(Arc<TypeParameterDescriptor>),
}

impl Classifier {
    pub fn name(&self) -> &Name {
        match self {
            Classifier::Class(class) => class.name(),
            Classifier::TypeParameter(parameter) => parameter.name(),
        }
    }

    pub fn as_class(&self) -> Option<&Arc<ClassDescriptor>> {
        match self {
            Classifier::Class(class) => Some(class),
            Classifier::TypeParameter(_) => None,
        }
    }

    pub fn to_declaration(&self) -> Declaration {
        match self {
            Classifier::Class(class) => Declaration::Class(Arc::clone(class)),
            Classifier::TypeParameter(parameter) => Declaration::TypeParameter(Arc::clone(parameter)),
        }
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_declaration(), f)
    }
}

#[cfg(test)]
mod tests;
