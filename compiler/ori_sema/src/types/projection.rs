//! Type arguments and substitution.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use super::{Type, TypeConstructor, TypeConstructorKind};
use crate::descriptor::{TypeParameterDescriptor, Variance};
use crate::stack::ensure_sufficient_stack;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum ProjectionKind {
    Star,
    Projected(Variance),
}

/// One type argument: `T`, `out T`, `in T`, or `*`.
///
/// A star projection still carries a type (the parameter's bound), but
/// containment queries ignore it.
#[derive(Clone)]
pub struct TypeProjection {
    kind: ProjectionKind,
    ty: Type,
}

impl TypeProjection {
    pub fn new(variance: Variance, ty: Type) -> Self {
        TypeProjection {
            kind: ProjectionKind::Projected(variance),
            ty,
        }
    }

    pub fn invariant(ty: Type) -> Self {
        Self::new(Variance::Invariant, ty)
    }

    pub fn star(bound: Type) -> Self {
        TypeProjection {
            kind: ProjectionKind::Star,
            ty: bound,
        }
    }

    #[inline]
    pub fn is_star(&self) -> bool {
        matches!(self.kind, ProjectionKind::Star)
    }

    /// Use-site variance; `None` for a star projection.
    pub fn variance(&self) -> Option<Variance> {
        match self.kind {
            ProjectionKind::Star => None,
            ProjectionKind::Projected(variance) => Some(variance),
        }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub(crate) fn into_type(self) -> Type {
        self.ty
    }
}

impl fmt::Display for TypeProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProjectionKind::Star => f.write_str("*"),
            ProjectionKind::Projected(Variance::Invariant) => write!(f, "{}", self.ty),
            ProjectionKind::Projected(variance) => write!(f, "{} {}", variance.label(), self.ty),
        }
    }
}

impl fmt::Debug for TypeProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Type parameters of a constructor paired with the arguments applied to
/// them.
#[derive(Clone)]
pub struct TypeSubstitution {
    parameters: Vec<Arc<TypeParameterDescriptor>>,
    arguments: Vec<TypeProjection>,
}

impl TypeSubstitution {
    /// Pairs by position; surplus parameters or arguments are ignored.
    pub fn new(parameters: Vec<Arc<TypeParameterDescriptor>>, arguments: Vec<TypeProjection>) -> Self {
        TypeSubstitution {
            parameters,
            arguments,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() || self.arguments.is_empty()
    }

    /// Replacement for a type whose constructor is one of the parameters.
    pub fn get(&self, key: &TypeConstructor) -> Option<&TypeProjection> {
        let TypeConstructorKind::TypeParameter(parameter) = key.kind() else {
            return None;
        };
        let position = self
            .parameters
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, parameter))?;
        self.arguments.get(position)
    }
}

impl fmt::Display for TypeSubstitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (parameter, argument)) in self.parameters.iter().zip(&self.arguments).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} -> {argument}", parameter.name())?;
        }
        f.write_str("}")
    }
}

/// Applies a [`TypeSubstitution`] to types.
///
/// Error types pass through unchanged: they have no parameters to
/// instantiate.
#[derive(Clone)]
pub struct TypeSubstitutor {
    substitution: TypeSubstitution,
}

impl TypeSubstitutor {
    pub fn new(substitution: TypeSubstitution) -> Self {
        TypeSubstitutor { substitution }
    }

    pub fn empty() -> Self {
        Self::new(TypeSubstitution::empty())
    }

    pub fn is_empty(&self) -> bool {
        self.substitution.is_empty()
    }

    pub fn substitution(&self) -> &TypeSubstitution {
        &self.substitution
    }

    pub fn substitute(&self, ty: &Type) -> Type {
        if self.is_empty() || ty.is_error() {
            return ty.clone();
        }

        if let Some(replacement) = self.substitution.get(ty.constructor()) {
            if replacement.is_star() {
                return ty.clone();
            }
            let replaced = replacement.ty();
            return if ty.is_marked_nullable() {
                replaced.with_nullability(true)
            } else {
                replaced.clone()
            };
        }

        if ty.arguments().is_empty() {
            return ty.clone();
        }

        let arguments: SmallVec<[TypeProjection; 2]> = ensure_sufficient_stack(|| {
            ty.arguments()
                .iter()
                .map(|argument| match argument.variance() {
                    None => argument.clone(),
                    Some(variance) => TypeProjection::new(variance, self.substitute(argument.ty())),
                })
                .collect()
        });
        Type::simple(
            ty.constructor().clone(),
            arguments,
            ty.is_marked_nullable(),
            ty.member_scope().clone(),
        )
    }
}
