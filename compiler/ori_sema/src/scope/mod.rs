//! Member scopes: name lookup surfaces of classes and types.
//!
//! A scope is one of three variants, fixed when it is created:
//!
//! - [`DeclaredScope`]: real members, indexed by name.
//! - [`ErrorScope`]: every lookup succeeds with further error sentinels.
//! - [`ThrowingScope`]: every lookup is a misuse fault. Used where the
//!   caller has proven the scope is never queried.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::descriptor::{Classifier, Declaration, FunctionDescriptor, PropertyDescriptor};
use crate::name::Name;

mod declared;
mod sentinel;

pub use declared::DeclaredScope;
pub use sentinel::{ErrorScope, ThrowingScope};

bitflags! {
    /// Which kinds of descriptors an enumeration should return.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct DescriptorKindFilter: u8 {
        const CLASSIFIERS = 1 << 0;
        const FUNCTIONS = 1 << 1;
        const VARIABLES = 1 << 2;
        const CALLABLES = Self::FUNCTIONS.bits() | Self::VARIABLES.bits();
    }
}

/// Where a lookup originates, for incremental-compilation bookkeeping.
///
/// Scopes here do not record lookups; the location is accepted so callers
/// can pass it through unchanged.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum LookupLocation {
    NoLocation,
    Source { file: Arc<str>, offset: u32 },
}

/// What an error scope does when queried.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ScopeAccess {
    /// Answer with more sentinels.
    #[default]
    Inert,
    /// Fault immediately.
    Throwing,
}

/// A member lookup surface. Cheap to clone.
#[derive(Clone)]
pub enum MemberScope {
    Declared(Arc<DeclaredScope>),
    Error(Arc<ErrorScope>),
    Throwing(Arc<ThrowingScope>),
}

impl MemberScope {
    /// A scope with no members.
    pub fn empty() -> Self {
        MemberScope::Declared(Arc::new(DeclaredScope::new()))
    }

    pub fn declared(scope: DeclaredScope) -> Self {
        MemberScope::Declared(Arc::new(scope))
    }

    /// Inert error scope. Public construction goes through
    /// [`crate::error::create_error_scope`].
    pub(crate) fn error(debug_message: &str) -> Self {
        Self::error_with(debug_message, ScopeAccess::Inert)
    }

    pub(crate) fn error_with(debug_message: &str, access: ScopeAccess) -> Self {
        match access {
            ScopeAccess::Inert => MemberScope::Error(Arc::new(ErrorScope::new(debug_message))),
            ScopeAccess::Throwing => {
                MemberScope::Throwing(Arc::new(ThrowingScope::new(debug_message)))
            }
        }
    }

    /// Whether this is an error scope of either variant.
    pub fn is_error(&self) -> bool {
        !matches!(self, MemberScope::Declared(_))
    }

    /// Debug label of an error scope.
    pub fn debug_message(&self) -> Option<&str> {
        match self {
            MemberScope::Declared(_) => None,
            MemberScope::Error(scope) => Some(scope.debug_message()),
            MemberScope::Throwing(scope) => Some(scope.debug_message()),
        }
    }

    pub fn contributed_classifier(
        &self,
        name: &Name,
        _location: &LookupLocation,
    ) -> Option<Classifier> {
        match self {
            MemberScope::Declared(scope) => scope.classifier(name),
            MemberScope::Error(scope) => Some(scope.contributed_classifier(name)),
            MemberScope::Throwing(scope) => scope.fail("contributed_classifier"),
        }
    }

    pub fn contributed_variables(
        &self,
        name: &Name,
        _location: &LookupLocation,
    ) -> Vec<Arc<PropertyDescriptor>> {
        match self {
            MemberScope::Declared(scope) => scope.variables(name),
            MemberScope::Error(scope) => scope.contributed_variables(),
            MemberScope::Throwing(scope) => scope.fail("contributed_variables"),
        }
    }

    pub fn contributed_functions(
        &self,
        name: &Name,
        _location: &LookupLocation,
    ) -> Vec<Arc<FunctionDescriptor>> {
        match self {
            MemberScope::Declared(scope) => scope.functions(name),
            MemberScope::Error(scope) => scope.contributed_functions(),
            MemberScope::Throwing(scope) => scope.fail("contributed_functions"),
        }
    }

    /// All members of the requested kinds whose names pass `name_filter`.
    pub fn contributed_descriptors(
        &self,
        kind_filter: DescriptorKindFilter,
        name_filter: impl Fn(&Name) -> bool,
    ) -> Vec<Declaration> {
        match self {
            MemberScope::Declared(scope) => scope.descriptors(kind_filter, name_filter),
            MemberScope::Error(_) => Vec::new(),
            MemberScope::Throwing(scope) => scope.fail("contributed_descriptors"),
        }
    }

    /// Write a one-line description of the scope for debug dumps.
    pub fn print_structure(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            MemberScope::Declared(scope) => scope.print_structure(out),
            MemberScope::Error(scope) => writeln!(out, "ErrorScope: {}", scope.debug_message()),
            MemberScope::Throwing(scope) => {
                writeln!(out, "ThrowingScope: {}", scope.debug_message())
            }
        }
    }
}

impl fmt::Display for MemberScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberScope::Declared(scope) => write!(f, "DeclaredScope{{{}}}", scope.len()),
            MemberScope::Error(scope) => write!(f, "ErrorScope{{{}}}", scope.debug_message()),
            MemberScope::Throwing(scope) => {
                write!(f, "ThrowingScope{{{}}}", scope.debug_message())
            }
        }
    }
}

impl fmt::Debug for MemberScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
