//! Class descriptors.

use std::fmt;
use std::sync::{Arc, Weak};

use super::{
    Annotations, ClassKind, ConstructorDescriptor, Declaration, DeclarationLink, Modality,
    SourceElement, TypeParameterDescriptor, Variance,
};
use crate::name::Name;
use crate::scope::MemberScope;
use crate::types::{Type, TypeProjection, TypeSubstitution, TypeSubstitutor};

pub(crate) enum ClassOrigin {
    Declared,
    /// Minted by the error factory; see [`crate::error::create_error_class`].
    Error,
}

/// Reference from a type constructor or constructor back to its class.
///
/// `Weak` when the class itself (transitively) owns the referrer.
#[derive(Clone)]
pub(crate) enum ClassLink {
    Strong(Arc<ClassDescriptor>),
    Weak(Weak<ClassDescriptor>),
}

impl ClassLink {
    pub(crate) fn get(&self) -> Option<Arc<ClassDescriptor>> {
        match self {
            ClassLink::Strong(class) => Some(Arc::clone(class)),
            ClassLink::Weak(class) => class.upgrade(),
        }
    }
}

/// A class, interface, object or enum.
pub struct ClassDescriptor {
    pub(crate) name: Name,
    pub(crate) containing: Declaration,
    pub(crate) modality: Modality,
    pub(crate) kind: ClassKind,
    pub(crate) supertypes: Vec<Type>,
    pub(crate) type_parameters: Vec<Arc<TypeParameterDescriptor>>,
    pub(crate) member_scope: MemberScope,
    pub(crate) constructors: Vec<Arc<ConstructorDescriptor>>,
    pub(crate) primary_constructor: Option<Arc<ConstructorDescriptor>>,
    pub(crate) source: SourceElement,
    pub(crate) origin: ClassOrigin,
}

impl ClassDescriptor {
    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn containing_declaration(&self) -> &Declaration {
        &self.containing
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn supertypes(&self) -> &[Type] {
        &self.supertypes
    }

    pub fn type_parameters(&self) -> &[Arc<TypeParameterDescriptor>] {
        &self.type_parameters
    }

    pub fn annotations(&self) -> Annotations {
        Annotations::EMPTY
    }

    pub fn source(&self) -> &SourceElement {
        &self.source
    }

    /// Whether this class is an error sentinel.
    pub fn is_error(&self) -> bool {
        matches!(self.origin, ClassOrigin::Error)
    }

    pub fn member_scope(&self) -> &MemberScope {
        &self.member_scope
    }

    /// Member scope of this class instantiated with `arguments`.
    ///
    /// Error classes have no generic shape; they answer with a fresh error
    /// scope naming the arguments.
    pub fn member_scope_for_arguments(&self, arguments: &[TypeProjection]) -> MemberScope {
        match self.origin {
            ClassOrigin::Declared => self.member_scope.clone(),
            ClassOrigin::Error => {
                let rendered: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                MemberScope::error(&format!(
                    "Error scope for class {} with arguments: [{}]",
                    self.name,
                    rendered.join(", ")
                ))
            }
        }
    }

    pub fn member_scope_for_substitution(&self, substitution: &TypeSubstitution) -> MemberScope {
        match self.origin {
            ClassOrigin::Declared => self.member_scope.clone(),
            ClassOrigin::Error => MemberScope::error(&format!(
                "Error scope for class {} with arguments: {substitution}",
                self.name
            )),
        }
    }

    pub fn constructors(&self) -> &[Arc<ConstructorDescriptor>] {
        &self.constructors
    }

    pub fn primary_constructor(&self) -> Option<&Arc<ConstructorDescriptor>> {
        self.primary_constructor.as_ref()
    }

    /// Substitution acts on types, not on class descriptors: every class
    /// substitutes to itself.
    pub fn substitute(self: &Arc<Self>, _substitutor: &TypeSubstitutor) -> Arc<Self> {
        Arc::clone(self)
    }
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassDescriptor({})", self.name)
    }
}

/// Builds a declared (non-sentinel) class.
pub struct ClassBuilder {
    containing: Declaration,
    name: Name,
    kind: ClassKind,
    modality: Modality,
    supertypes: Vec<Type>,
    type_parameters: Vec<(Name, Variance)>,
    member_scope: Option<MemberScope>,
    source: SourceElement,
}

impl ClassBuilder {
    pub fn new(containing: Declaration, name: Name, kind: ClassKind) -> Self {
        ClassBuilder {
            containing,
            name,
            kind,
            modality: Modality::Final,
            supertypes: Vec::new(),
            type_parameters: Vec::new(),
            member_scope: None,
            source: SourceElement::NoSource,
        }
    }

    #[must_use]
    pub fn modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    #[must_use]
    pub fn supertype(mut self, supertype: Type) -> Self {
        self.supertypes.push(supertype);
        self
    }

    /// Add a type parameter bounded by `Any?`.
    #[must_use]
    pub fn type_parameter(mut self, name: Name, variance: Variance) -> Self {
        self.type_parameters.push((name, variance));
        self
    }

    #[must_use]
    pub fn member_scope(mut self, scope: MemberScope) -> Self {
        self.member_scope = Some(scope);
        self
    }

    #[must_use]
    pub fn source(mut self, source: SourceElement) -> Self {
        self.source = source;
        self
    }

    pub fn build(self) -> Arc<ClassDescriptor> {
        let ClassBuilder {
            containing,
            name,
            kind,
            modality,
            supertypes,
            type_parameters,
            member_scope,
            source,
        } = self;

        Arc::new_cyclic(|this| {
            let type_parameters = type_parameters
                .into_iter()
                .enumerate()
                .map(|(index, (name, variance))| {
                    Arc::new(TypeParameterDescriptor::with_default_bound(
                        DeclarationLink::Class(Weak::clone(this)),
                        false,
                        variance,
                        name,
                        index,
                    ))
                })
                .collect();

            ClassDescriptor {
                name,
                containing,
                modality,
                kind,
                supertypes,
                type_parameters,
                member_scope: member_scope.unwrap_or_else(MemberScope::empty),
                constructors: Vec::new(),
                primary_constructor: None,
                source,
                origin: ClassOrigin::Declared,
            }
        })
    }
}
