//! Semantic model for Ori, with error sentinels.
//!
//! The type checker works on descriptors (modules, classes, callables, type
//! parameters), member scopes, and types. When resolution or inference fails
//! it does not bail out: it substitutes an *error sentinel* from the
//! [`error`] module. Sentinels satisfy the full read-only contract of the
//! value they replace, so later passes keep running on well-formed data.
//!
//! # Detecting failures
//!
//! Sentinels carry a marker that survives composition:
//!
//! - [`error::is_error`]: is this declaration a sentinel, or owned by one?
//! - [`error::contains_error_type`]: is there a sentinel anywhere in this
//!   type's argument tree? O(1) via [`TypeFlags`].
//! - [`error::is_uninferred_parameter`] / [`error::contains_uninferred_parameter`]:
//!   the narrower "inference failed for a type parameter" marker.
//!
//! Diagnostic reporting uses these to suppress cascading errors for code
//! that is already known to be broken.
//!
//! # Sharing
//!
//! Everything is immutable after construction and shared through `Arc`.
//! The process-wide sentinels (module, default class, error property) are
//! created once by [`error::init`] or on first use.

mod builtins;
mod descriptor;
pub mod error;
mod name;
mod scope;
mod stack;
mod types;

pub use builtins::BuiltIns;
pub use descriptor::{
    Annotations, ClassBuilder, ClassDescriptor, ClassKind, Classifier, ConstructorDescriptor,
    Declaration, DeclarationVisitor, FunctionBuilder, FunctionDescriptor, ImportPath, Modality,
    ModuleCapability, ModuleDescriptor, PackageViewDescriptor, PlatformClassMap,
    PropertyDescriptor, ReceiverParameterDescriptor, SourceElement, TypeParameterDescriptor,
    ValueParameterDescriptor, Variance, Visibility,
};
pub use name::{FqName, Name};
pub use scope::{
    DeclaredScope, DescriptorKindFilter, ErrorScope, LookupLocation, MemberScope, ScopeAccess,
    ThrowingScope,
};
pub use types::{
    contains, ErrorTypeConstructor, Type, TypeCapabilities, TypeConstructor,
    TypeConstructorKind, TypeFlags, TypeProjection, TypeSubstitution, TypeSubstitutor,
    UninferredParameterConstructor,
};
