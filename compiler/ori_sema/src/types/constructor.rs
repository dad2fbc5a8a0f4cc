//! Type constructors: the identity behind a type.

use std::fmt;
use std::sync::Arc;

use super::Type;
use crate::builtins::BuiltIns;
use crate::descriptor::{
    Annotations, ClassDescriptor, ClassLink, Classifier, Declaration, Modality,
    TypeParameterDescriptor,
};

/// Constructor of an error type.
///
/// Never denotable, never final, no parameters or super-types. Points back
/// at the error class that owns it.
#[derive(Clone)]
pub struct ErrorTypeConstructor {
    debug_name: String,
    owner: ClassLink,
}

impl ErrorTypeConstructor {
    pub(crate) fn new(debug_name: &str, owner: ClassLink) -> Self {
        ErrorTypeConstructor {
            debug_name: debug_name.to_owned(),
            owner,
        }
    }

    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    /// The owning error class, unless it has already been dropped.
    pub fn owner(&self) -> Option<Arc<ClassDescriptor>> {
        self.owner.get()
    }
}

/// Constructor of the type standing in for a type parameter whose argument
/// could not be inferred.
///
/// Holds the parameter for later reporting ("cannot infer `T`"); every
/// other query goes to an ordinary error constructor.
#[derive(Clone)]
pub struct UninferredParameterConstructor {
    type_parameter: Arc<TypeParameterDescriptor>,
    delegate: ErrorTypeConstructor,
}

impl UninferredParameterConstructor {
    pub(crate) fn new(
        type_parameter: Arc<TypeParameterDescriptor>,
        delegate: ErrorTypeConstructor,
    ) -> Self {
        UninferredParameterConstructor {
            type_parameter,
            delegate,
        }
    }

    pub fn type_parameter(&self) -> &Arc<TypeParameterDescriptor> {
        &self.type_parameter
    }

    pub fn delegate(&self) -> &ErrorTypeConstructor {
        &self.delegate
    }
}

/// What a type constructor refers to.
pub enum TypeConstructorKind {
    Class(Arc<ClassDescriptor>),
    TypeParameter(Arc<TypeParameterDescriptor>),
    Error(ErrorTypeConstructor),
    UninferredParameter(UninferredParameterConstructor),
}

/// Identity of a type, independent of its arguments and nullability.
///
/// Cheap to clone; [`TypeConstructor::ptr_eq`] compares identity.
#[derive(Clone)]
pub struct TypeConstructor(Arc<TypeConstructorKind>);

impl TypeConstructor {
    pub fn class(class: Arc<ClassDescriptor>) -> Self {
        TypeConstructor(Arc::new(TypeConstructorKind::Class(class)))
    }

    pub fn type_parameter(parameter: Arc<TypeParameterDescriptor>) -> Self {
        TypeConstructor(Arc::new(TypeConstructorKind::TypeParameter(parameter)))
    }

    pub(crate) fn error(constructor: ErrorTypeConstructor) -> Self {
        TypeConstructor(Arc::new(TypeConstructorKind::Error(constructor)))
    }

    pub(crate) fn uninferred_parameter(constructor: UninferredParameterConstructor) -> Self {
        TypeConstructor(Arc::new(TypeConstructorKind::UninferredParameter(
            constructor,
        )))
    }

    #[inline]
    pub fn kind(&self) -> &TypeConstructorKind {
        &self.0
    }

    /// Error or uninferred-parameter constructor.
    pub fn is_error(&self) -> bool {
        matches!(
            *self.0,
            TypeConstructorKind::Error(_) | TypeConstructorKind::UninferredParameter(_)
        )
    }

    pub fn as_uninferred_parameter(&self) -> Option<&UninferredParameterConstructor> {
        match &*self.0 {
            TypeConstructorKind::UninferredParameter(constructor) => Some(constructor),
            _ => None,
        }
    }

    pub fn parameters(&self) -> Vec<Arc<TypeParameterDescriptor>> {
        match &*self.0 {
            TypeConstructorKind::Class(class) => class.type_parameters().to_vec(),
            TypeConstructorKind::TypeParameter(_)
            | TypeConstructorKind::Error(_)
            | TypeConstructorKind::UninferredParameter(_) => Vec::new(),
        }
    }

    pub fn supertypes(&self) -> Vec<Type> {
        match &*self.0 {
            TypeConstructorKind::Class(class) => class.supertypes().to_vec(),
            TypeConstructorKind::TypeParameter(parameter) => parameter.upper_bounds().to_vec(),
            TypeConstructorKind::Error(_) | TypeConstructorKind::UninferredParameter(_) => {
                Vec::new()
            }
        }
    }

    /// Whether no other type can be a subtype of this one.
    pub fn is_final(&self) -> bool {
        match &*self.0 {
            TypeConstructorKind::Class(class) => class.modality() == Modality::Final,
            TypeConstructorKind::TypeParameter(_)
            | TypeConstructorKind::Error(_)
            | TypeConstructorKind::UninferredParameter(_) => false,
        }
    }

    /// Whether the type can be written in source.
    pub fn is_denotable(&self) -> bool {
        match &*self.0 {
            TypeConstructorKind::Class(_) | TypeConstructorKind::TypeParameter(_) => true,
            TypeConstructorKind::Error(_) | TypeConstructorKind::UninferredParameter(_) => false,
        }
    }

    pub fn declaration_descriptor(&self) -> Option<Classifier> {
        match &*self.0 {
            TypeConstructorKind::Class(class) => Some(Classifier::Class(Arc::clone(class))),
            TypeConstructorKind::TypeParameter(parameter) => {
                Some(Classifier::TypeParameter(Arc::clone(parameter)))
            }
            TypeConstructorKind::Error(constructor) => constructor.owner().map(Classifier::Class),
            TypeConstructorKind::UninferredParameter(constructor) => {
                constructor.delegate.owner().map(Classifier::Class)
            }
        }
    }

    pub fn annotations(&self) -> Annotations {
        Annotations::EMPTY
    }

    pub fn builtins(&self) -> &'static BuiltIns {
        match &*self.0 {
            TypeConstructorKind::UninferredParameter(constructor) => {
                Declaration::TypeParameter(Arc::clone(&constructor.type_parameter)).builtins()
            }
            TypeConstructorKind::Class(class) => Declaration::Class(Arc::clone(class)).builtins(),
            TypeConstructorKind::TypeParameter(parameter) => {
                Declaration::TypeParameter(Arc::clone(parameter)).builtins()
            }
            TypeConstructorKind::Error(_) => BuiltIns::default_instance(),
        }
    }

    /// Reference identity.
    pub fn ptr_eq(&self, other: &TypeConstructor) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for TypeConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            TypeConstructorKind::Class(class) => write!(f, "{}", class.name()),
            TypeConstructorKind::TypeParameter(parameter) => write!(f, "{}", parameter.name()),
            TypeConstructorKind::Error(constructor) => f.write_str(&constructor.debug_name),
            TypeConstructorKind::UninferredParameter(constructor) => {
                f.write_str(&constructor.delegate.debug_name)
            }
        }
    }
}

impl fmt::Debug for TypeConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeConstructor({self})")
    }
}
