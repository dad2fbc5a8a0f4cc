//! Type parameter descriptors.

use std::fmt;
use std::sync::Arc;

use super::{Annotations, Declaration, DeclarationLink, Variance};
use crate::builtins::BuiltIns;
use crate::name::Name;
use crate::scope::MemberScope;
use crate::types::{Type, TypeConstructor};

/// A type parameter of a class or function, e.g. `T` in `List<T>`.
pub struct TypeParameterDescriptor {
    containing: DeclarationLink,
    name: Name,
    index: usize,
    variance: Variance,
    reified: bool,
    upper_bounds: Vec<Type>,
}

impl TypeParameterDescriptor {
    pub(crate) fn new(
        containing: DeclarationLink,
        name: Name,
        index: usize,
        variance: Variance,
        reified: bool,
        upper_bounds: Vec<Type>,
    ) -> Self {
        TypeParameterDescriptor {
            containing,
            name,
            index,
            variance,
            reified,
            upper_bounds,
        }
    }

    /// A type parameter bounded only by `Any?`.
    pub(crate) fn with_default_bound(
        containing: DeclarationLink,
        reified: bool,
        variance: Variance,
        name: Name,
        index: usize,
    ) -> Self {
        let bound = BuiltIns::default_instance().nullable_any_type();
        Self::new(containing, name, index, variance, reified, vec![bound])
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Position in the owner's type parameter list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn variance(&self) -> Variance {
        self.variance
    }

    pub fn is_reified(&self) -> bool {
        self.reified
    }

    pub fn upper_bounds(&self) -> &[Type] {
        &self.upper_bounds
    }

    pub fn annotations(&self) -> Annotations {
        Annotations::EMPTY
    }

    /// The owning class or function, unless it has already been dropped.
    pub fn containing_declaration(&self) -> Option<Declaration> {
        self.containing.get()
    }

    pub fn type_constructor(self: &Arc<Self>) -> TypeConstructor {
        TypeConstructor::type_parameter(Arc::clone(self))
    }

    /// The type `T` itself.
    pub fn default_type(self: &Arc<Self>) -> Type {
        Type::simple(self.type_constructor(), Vec::new(), false, MemberScope::empty())
    }
}

impl fmt::Debug for TypeParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeParameterDescriptor({}#{})", self.name, self.index)
    }
}
