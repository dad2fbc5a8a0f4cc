//! Error sentinels.
//!
//! When resolution or inference fails, the checker records a diagnostic
//! and keeps going with a sentinel in place of the missing result. Every
//! sentinel answers the same read-only queries as the value it replaces,
//! and every sentinel can be recognised afterwards:
//!
//! | Sentinel | Recognised by |
//! |---|---|
//! | error module, error classes and their members | [`is_error`] |
//! | error types, at any depth | [`contains_error_type`] |
//! | "could not infer `T`" types | [`is_uninferred_parameter`], [`contains_uninferred_parameter`] |
//!
//! # Process-wide sentinels
//!
//! The error module, the default error class and the error property exist
//! once per process in [`ErrorSentinels`]. They are created on first use;
//! call [`init`] before spawning worker threads to make the ordering
//! explicit. Everything else is minted fresh per call.
//!
//! # Misuse
//!
//! A [`ScopeAccess::Throwing`] scope and a few module queries that need a
//! real module graph panic with a [`SentinelMisuse`] message. Reaching
//! one is a bug in the caller.

use std::sync::{Arc, OnceLock, Weak};

use crate::descriptor::{
    ClassDescriptor, ClassKind, ClassLink, ClassOrigin, ConstructorDescriptor, Declaration,
    DeclarationLink, FunctionDescriptor, Modality, ModuleDescriptor, PropertyDescriptor,
    SourceElement, TypeParameterDescriptor, Variance, Visibility,
};
use crate::name::Name;
use crate::scope::{MemberScope, ScopeAccess};
use crate::types::{
    ErrorTypeConstructor, Type, TypeConstructor, TypeProjection, UninferredParameterConstructor,
};

mod misuse;
mod queries;

pub(crate) use misuse::misuse;
pub use misuse::SentinelMisuse;
pub use queries::{
    contains_error_type, contains_uninferred_parameter, function_contains_error_type, is_error,
    is_uninferred_parameter, uninferred_type_parameter,
};

/// The process-wide sentinels, and the factories that hang new sentinels
/// off them.
pub struct ErrorSentinels {
    module: Arc<ModuleDescriptor>,
    class: Arc<ClassDescriptor>,
    property: Arc<PropertyDescriptor>,
}

static SENTINELS: OnceLock<ErrorSentinels> = OnceLock::new();

impl ErrorSentinels {
    /// The shared instance, created on first call.
    pub fn global() -> &'static ErrorSentinels {
        SENTINELS.get_or_init(|| {
            tracing::debug!("initializing error sentinels");
            ErrorSentinels::new()
        })
    }

    // Must not reach `global()`: it runs inside its initializer.
    fn new() -> Self {
        let module = Arc::new(ModuleDescriptor::error(Name::special("<ERROR MODULE>")));
        let class = mint_error_class(&module, Name::special("<ERROR CLASS>"));

        let property_type = Type::error(
            error_type_constructor(
                &format!("[ERROR : {PROPERTY_TYPE_LABEL}]"),
                ClassLink::Strong(Arc::clone(&class)),
            ),
            MemberScope::error(PROPERTY_TYPE_LABEL),
            Vec::new(),
        );
        let property = Arc::new(PropertyDescriptor::new(
            Declaration::Class(Arc::clone(&class)),
            Name::special("<ERROR PROPERTY>"),
            property_type,
            Modality::Open,
            Visibility::Internal,
            true,
        ));

        ErrorSentinels {
            module,
            class,
            property,
        }
    }

    /// The module that owns every error class.
    pub fn error_module(&self) -> &Arc<ModuleDescriptor> {
        &self.module
    }

    /// `<ERROR CLASS>`: owner of the error property, error functions and
    /// error type parameters.
    pub fn error_class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    /// `<ERROR PROPERTY>`, returned by every variable lookup on an error
    /// scope.
    pub fn error_property(&self) -> &Arc<PropertyDescriptor> {
        &self.property
    }

    /// Result of a variable lookup on an error scope: the error property
    /// and nothing else.
    pub fn error_property_group(&self) -> Vec<Arc<PropertyDescriptor>> {
        vec![Arc::clone(&self.property)]
    }

    /// A new error class named `<ERROR CLASS: label>`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn create_error_class(&self, label: &str) -> Arc<ClassDescriptor> {
        mint_error_class(&self.module, Name::special(&format!("<ERROR CLASS: {label}>")))
    }

    /// An error type with no arguments. See
    /// [`ErrorSentinels::create_error_type_with_arguments`].
    pub fn create_error_type(&self, message: &str) -> Type {
        self.create_error_type_with_arguments(message, Vec::new())
    }

    /// An error type over a fresh `[ERROR : message]` constructor, with an
    /// inert scope labelled `message`.
    pub fn create_error_type_with_arguments(
        &self,
        message: &str,
        arguments: Vec<TypeProjection>,
    ) -> Type {
        tracing::trace!(label = message, arguments = arguments.len(), "minting error type");
        Type::error(
            self.create_error_type_constructor(message),
            MemberScope::error(message),
            arguments,
        )
    }

    /// An error type whose constructor renders exactly as `debug_name`.
    pub fn create_error_type_with_custom_debug_name(&self, debug_name: &str) -> Type {
        create_error_type_with_custom_constructor(
            debug_name,
            self.create_error_type_constructor_with_custom_debug_name(debug_name),
        )
    }

    /// A constructor rendering as `[ERROR : message]`, owned by the default
    /// error class.
    pub fn create_error_type_constructor(&self, message: &str) -> TypeConstructor {
        self.create_error_type_constructor_with_custom_debug_name(&format!("[ERROR : {message}]"))
    }

    /// A constructor rendering exactly as `debug_name`, owned by the
    /// default error class.
    pub fn create_error_type_constructor_with_custom_debug_name(
        &self,
        debug_name: &str,
    ) -> TypeConstructor {
        create_error_type_constructor_owned_by(debug_name, &self.class)
    }

    /// An invariant, non-reified type parameter named `<ERROR: message>`,
    /// bounded by `Any?` and owned by the default error class.
    pub fn create_error_type_parameter(
        &self,
        index: usize,
        message: &str,
    ) -> Arc<TypeParameterDescriptor> {
        tracing::trace!(index, label = message, "minting error type parameter");
        Arc::new(TypeParameterDescriptor::with_default_bound(
            DeclarationLink::Strong(Declaration::Class(Arc::clone(&self.class))),
            false,
            Variance::Invariant,
            Name::special(&format!("<ERROR: {message}>")),
            index,
        ))
    }

    /// The type standing in for `parameter` when its argument could not be
    /// inferred.
    #[tracing::instrument(level = "trace", skip_all, fields(parameter = %parameter.name()))]
    pub fn create_uninferred_parameter_type(&self, parameter: &Arc<TypeParameterDescriptor>) -> Type {
        let delegate = ErrorTypeConstructor::new(
            &format!("CANT_INFER_TYPE_PARAMETER: {}", parameter.name()),
            ClassLink::Strong(Arc::clone(&self.class)),
        );
        let constructor = TypeConstructor::uninferred_parameter(UninferredParameterConstructor::new(
            Arc::clone(parameter),
            delegate,
        ));
        create_error_type_with_custom_constructor(
            &format!(
                "Scope for error type for not inferred parameter: {}",
                parameter.name()
            ),
            constructor,
        )
    }

    /// The function an error scope hands out for every function name.
    fn create_error_function(&self, scope_label: &str) -> Arc<FunctionDescriptor> {
        Arc::new(FunctionDescriptor::error(
            Declaration::Class(Arc::clone(&self.class)),
            Name::special("<ERROR FUNCTION>"),
            scope_label,
            self.create_error_type("<ERROR FUNCTION RETURN TYPE>"),
        ))
    }
}

const PROPERTY_TYPE_LABEL: &str = "<ERROR PROPERTY TYPE>";

/// Build an error class with its synthetic constructor.
///
/// The constructor's return type is an error type over an `<ERROR>`
/// constructor that points back at the class, sharing the class's scope.
fn mint_error_class(module: &Arc<ModuleDescriptor>, name: Name) -> Arc<ClassDescriptor> {
    tracing::trace!(%name, "minting error class");
    let member_scope = MemberScope::error(name.as_str());

    Arc::new_cyclic(|this: &Weak<ClassDescriptor>| {
        let return_type = Type::error(
            error_type_constructor("<ERROR>", ClassLink::Weak(Weak::clone(this))),
            member_scope.clone(),
            Vec::new(),
        );
        let constructor = Arc::new(ConstructorDescriptor::synthetic(
            Weak::clone(this),
            Visibility::Internal,
            return_type,
        ));

        ClassDescriptor {
            name,
            containing: Declaration::Module(Arc::clone(module)),
            modality: Modality::Open,
            kind: ClassKind::Class,
            supertypes: Vec::new(),
            type_parameters: Vec::new(),
            member_scope,
            constructors: vec![Arc::clone(&constructor)],
            primary_constructor: Some(constructor),
            source: SourceElement::NoSource,
            origin: ClassOrigin::Error,
        }
    })
}

fn error_type_constructor(debug_name: &str, owner: ClassLink) -> TypeConstructor {
    TypeConstructor::error(ErrorTypeConstructor::new(debug_name, owner))
}

/// Create the process-wide sentinels now rather than on first use.
pub fn init() -> &'static ErrorSentinels {
    ErrorSentinels::global()
}

/// The error module.
pub fn error_module() -> &'static Arc<ModuleDescriptor> {
    ErrorSentinels::global().error_module()
}

/// A new error class named `<ERROR CLASS: label>`, owned by the error
/// module.
pub fn create_error_class(label: &str) -> Arc<ClassDescriptor> {
    ErrorSentinels::global().create_error_class(label)
}

/// An inert error scope: lookups answer with more sentinels.
pub fn create_error_scope(message: &str) -> MemberScope {
    MemberScope::error(message)
}

/// An error scope with an explicit access policy.
pub fn create_error_scope_with(message: &str, access: ScopeAccess) -> MemberScope {
    MemberScope::error_with(message, access)
}

/// An error type rendering as `[ERROR : message]`, with no arguments and
/// an inert scope labelled `message`.
pub fn create_error_type(message: &str) -> Type {
    ErrorSentinels::global().create_error_type(message)
}

/// Like [`create_error_type`], keeping whatever arguments were resolved.
///
/// Errors among `arguments` propagate to the result's flags like any other
/// argument; star projections do not.
pub fn create_error_type_with_arguments(message: &str, arguments: Vec<TypeProjection>) -> Type {
    ErrorSentinels::global().create_error_type_with_arguments(message, arguments)
}

/// An error type rendering exactly as `debug_name`, with no `[ERROR : ]`
/// wrapping.
pub fn create_error_type_with_custom_debug_name(debug_name: &str) -> Type {
    ErrorSentinels::global().create_error_type_with_custom_debug_name(debug_name)
}

/// An error type over `constructor`, with an inert scope labelled
/// `debug_name`.
pub fn create_error_type_with_custom_constructor(
    debug_name: &str,
    constructor: TypeConstructor,
) -> Type {
    tracing::trace!(debug_name, %constructor, "minting error type");
    Type::error(constructor, MemberScope::error(debug_name), Vec::new())
}

/// A fresh constructor rendering as `[ERROR : message]`, owned by the
/// default error class. Two calls never return the same constructor.
pub fn create_error_type_constructor(message: &str) -> TypeConstructor {
    ErrorSentinels::global().create_error_type_constructor(message)
}

/// A fresh constructor rendering exactly as `debug_name`, owned by the
/// default error class.
pub fn create_error_type_constructor_with_custom_debug_name(debug_name: &str) -> TypeConstructor {
    ErrorSentinels::global().create_error_type_constructor_with_custom_debug_name(debug_name)
}

/// An error constructor whose declaration descriptor is `owner`.
///
/// Only error classes can own error constructors. Any other `owner` is
/// replaced by the default error class.
pub fn create_error_type_constructor_owned_by(
    debug_name: &str,
    owner: &Arc<ClassDescriptor>,
) -> TypeConstructor {
    let owner = if owner.is_error() {
        Arc::clone(owner)
    } else {
        tracing::warn!(owner = %owner.name(), "error constructor owner is not an error class");
        Arc::clone(ErrorSentinels::global().error_class())
    };
    error_type_constructor(debug_name, ClassLink::Strong(owner))
}

/// A type parameter named `<ERROR: message>` at position `index`: invariant,
/// not reified, bounded by `Any?`, and owned by the default error class.
pub fn create_error_type_parameter(index: usize, message: &str) -> Arc<TypeParameterDescriptor> {
    ErrorSentinels::global().create_error_type_parameter(index, message)
}

/// The error type recorded when no argument could be inferred for
/// `parameter`.
///
/// It renders as `CANT_INFER_TYPE_PARAMETER: T`, and
/// [`uninferred_type_parameter`] recovers `parameter` from it.
pub fn create_uninferred_parameter_type(parameter: &Arc<TypeParameterDescriptor>) -> Type {
    ErrorSentinels::global().create_uninferred_parameter_type(parameter)
}

pub(crate) fn create_error_function(scope_label: &str) -> Arc<FunctionDescriptor> {
    ErrorSentinels::global().create_error_function(scope_label)
}
