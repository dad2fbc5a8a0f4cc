//! Types of the semantic model.
//!
//! A [`Type`] is a constructor, its argument projections, a member scope,
//! and a representation: either a simple (possibly nullable) type or an
//! error sentinel. Types are immutable and shared; cloning is an `Arc` bump.
//!
//! # Flags
//!
//! Every type carries [`TypeFlags`] computed once at construction. The
//! presence flags answer "is there an error anywhere in here?" without a
//! walk; [`contains`] is the general walk for arbitrary predicates.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::descriptor::{Annotations, ClassDescriptor};
use crate::scope::MemberScope;
use crate::stack::ensure_sufficient_stack;

mod constructor;
mod flags;
mod projection;

pub use constructor::{
    ErrorTypeConstructor, TypeConstructor, TypeConstructorKind, UninferredParameterConstructor,
};
pub use flags::TypeFlags;
pub use projection::{TypeProjection, TypeSubstitution, TypeSubstitutor};

/// Extra behaviour a type can opt into (custom subtyping, flexible bounds).
///
/// Nothing here opts in; the handle exists so callers can ask.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeCapabilities {
    _private: (),
}

impl TypeCapabilities {
    pub const NONE: TypeCapabilities = TypeCapabilities { _private: () };

    #[inline]
    pub const fn is_empty(self) -> bool {
        true
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum TypeRepr {
    Simple { nullable: bool },
    Error,
}

struct TypeData {
    constructor: TypeConstructor,
    arguments: SmallVec<[TypeProjection; 2]>,
    member_scope: MemberScope,
    repr: TypeRepr,
    flags: TypeFlags,
}

// Arguments are released from a worklist so nesting depth never reaches
// the call stack.
impl Drop for TypeData {
    fn drop(&mut self) {
        if self.arguments.is_empty() {
            return;
        }
        let mut pending: Vec<Type> = self
            .arguments
            .drain(..)
            .map(TypeProjection::into_type)
            .collect();
        while let Some(Type(data)) = pending.pop() {
            if let Some(mut data) = Arc::into_inner(data) {
                pending.extend(data.arguments.drain(..).map(TypeProjection::into_type));
            }
        }
    }
}

/// A type: `List<Int>`, `T?`, or an error sentinel.
#[derive(Clone)]
pub struct Type(Arc<TypeData>);

// Types are passed around by value everywhere; keep them pointer-sized.
#[cfg(target_pointer_width = "64")]
const _: () = assert!(std::mem::size_of::<Type>() == 8);

impl Type {
    fn build(
        constructor: TypeConstructor,
        arguments: SmallVec<[TypeProjection; 2]>,
        member_scope: MemberScope,
        repr: TypeRepr,
    ) -> Self {
        let mut flags = TypeFlags::propagate_all(
            arguments
                .iter()
                .filter(|argument| !argument.is_star())
                .map(|argument| argument.ty().flags()),
        );
        match repr {
            TypeRepr::Simple { nullable: true } => flags |= TypeFlags::IS_NULLABLE,
            TypeRepr::Simple { nullable: false } => {}
            TypeRepr::Error => flags |= TypeFlags::IS_ERROR | TypeFlags::HAS_ERROR,
        }
        if constructor.as_uninferred_parameter().is_some() {
            flags |= TypeFlags::IS_UNINFERRED | TypeFlags::HAS_UNINFERRED;
        }

        Type(Arc::new(TypeData {
            constructor,
            arguments,
            member_scope,
            repr,
            flags,
        }))
    }

    /// A non-error type.
    pub fn simple(
        constructor: TypeConstructor,
        arguments: impl IntoIterator<Item = TypeProjection>,
        nullable: bool,
        member_scope: MemberScope,
    ) -> Self {
        Self::build(
            constructor,
            arguments.into_iter().collect(),
            member_scope,
            TypeRepr::Simple { nullable },
        )
    }

    /// `class<arguments>`, scoped by the class's member scope for those
    /// arguments.
    ///
    /// An error class yields an error type, so a classifier handed out by
    /// an error scope stays recognisable once instantiated. `nullable` is
    /// ignored in that case.
    pub fn of_class(
        class: &Arc<ClassDescriptor>,
        arguments: Vec<TypeProjection>,
        nullable: bool,
    ) -> Self {
        let member_scope = class.member_scope_for_arguments(&arguments);
        let constructor = TypeConstructor::class(Arc::clone(class));
        if class.is_error() {
            return Self::error(constructor, member_scope, arguments);
        }
        Self::simple(constructor, arguments, nullable, member_scope)
    }

    /// An error sentinel. Public construction goes through the factories in
    /// [`crate::error`].
    pub(crate) fn error(
        constructor: TypeConstructor,
        member_scope: MemberScope,
        arguments: Vec<TypeProjection>,
    ) -> Self {
        Self::build(
            constructor,
            arguments.into_iter().collect(),
            member_scope,
            TypeRepr::Error,
        )
    }

    #[inline]
    pub fn constructor(&self) -> &TypeConstructor {
        &self.0.constructor
    }

    #[inline]
    pub fn arguments(&self) -> &[TypeProjection] {
        &self.0.arguments
    }

    pub fn member_scope(&self) -> &MemberScope {
        &self.0.member_scope
    }

    /// `T?`. Error types are never nullable.
    #[inline]
    pub fn is_marked_nullable(&self) -> bool {
        matches!(self.0.repr, TypeRepr::Simple { nullable: true })
    }

    /// Whether this type itself is an error sentinel. See
    /// [`crate::error::contains_error_type`] for the deep check.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.0.repr, TypeRepr::Error)
    }

    #[inline]
    pub fn flags(&self) -> TypeFlags {
        self.0.flags
    }

    pub fn annotations(&self) -> Annotations {
        Annotations::EMPTY
    }

    pub fn capabilities(&self) -> TypeCapabilities {
        TypeCapabilities::NONE
    }

    /// The constructor's parameters paired with this type's arguments.
    pub fn substitution(&self) -> TypeSubstitution {
        TypeSubstitution::new(self.0.constructor.parameters(), self.arguments().to_vec())
    }

    /// This type with nullability set to `nullable`.
    ///
    /// Error types ignore the request and return themselves.
    #[must_use]
    pub fn with_nullability(&self, nullable: bool) -> Type {
        match self.0.repr {
            TypeRepr::Error => self.clone(),
            TypeRepr::Simple { nullable: current } if current == nullable => self.clone(),
            TypeRepr::Simple { .. } => Type::simple(
                self.0.constructor.clone(),
                self.0.arguments.iter().cloned(),
                nullable,
                self.0.member_scope.clone(),
            ),
        }
    }

    /// Reference identity.
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.constructor)?;
        if !self.0.arguments.is_empty() {
            f.write_str("<")?;
            ensure_sufficient_stack(|| {
                for (i, argument) in self.0.arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                Ok(())
            })?;
            f.write_str(">")?;
        }
        if self.is_marked_nullable() {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = if self.is_error() { "ErrorType" } else { "Type" };
        write!(f, "{repr}({self})")
    }
}

/// Depth-first search of `ty` and its argument tree for a type matching
/// `predicate`. Star projections are skipped.
pub fn contains(ty: &Type, predicate: &impl Fn(&Type) -> bool) -> bool {
    if predicate(ty) {
        return true;
    }
    ensure_sufficient_stack(|| {
        ty.arguments()
            .iter()
            .filter(|argument| !argument.is_star())
            .any(|argument| contains(argument.ty(), predicate))
    })
}

#[cfg(test)]
mod tests;
