//! Callable members: constructors, functions, properties, and their
//! parameters.

use std::fmt;
use std::sync::{Arc, Weak};

use super::{
    Annotations, ClassDescriptor, ClassLink, Declaration, DeclarationLink, Modality,
    SourceElement, TypeParameterDescriptor, Variance, Visibility,
};
use crate::name::Name;
use crate::types::Type;

/// A value parameter of a function or constructor.
#[derive(Clone, Debug)]
pub struct ValueParameterDescriptor {
    name: Name,
    index: usize,
    ty: Type,
}

impl ValueParameterDescriptor {
    pub fn new(name: Name, index: usize, ty: Type) -> Self {
        ValueParameterDescriptor { name, index, ty }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

/// The receiver of an extension function.
#[derive(Clone, Debug)]
pub struct ReceiverParameterDescriptor {
    ty: Type,
}

impl ReceiverParameterDescriptor {
    pub fn new(ty: Type) -> Self {
        ReceiverParameterDescriptor { ty }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

/// A class constructor.
pub struct ConstructorDescriptor {
    containing: ClassLink,
    is_primary: bool,
    value_parameters: Vec<ValueParameterDescriptor>,
    visibility: Visibility,
    return_type: Type,
    source: SourceElement,
}

impl ConstructorDescriptor {
    /// A compiler-synthesized primary constructor with no parameters.
    ///
    /// The class owns the constructor, so the back-reference is weak.
    pub(crate) fn synthetic(
        owner: Weak<ClassDescriptor>,
        visibility: Visibility,
        return_type: Type,
    ) -> Self {
        ConstructorDescriptor {
            containing: ClassLink::Weak(owner),
            is_primary: true,
            value_parameters: Vec::new(),
            visibility,
            return_type,
            source: SourceElement::NoSource,
        }
    }

    /// The owning class, unless it has already been dropped.
    pub fn containing_declaration(&self) -> Option<Arc<ClassDescriptor>> {
        self.containing.get()
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn value_parameters(&self) -> &[ValueParameterDescriptor] {
        &self.value_parameters
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn annotations(&self) -> Annotations {
        Annotations::EMPTY
    }

    pub fn source(&self) -> &SourceElement {
        &self.source
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstructorDescriptor(-> {})", self.return_type)
    }
}

pub(crate) enum FunctionOrigin {
    Declared,
    /// Returned by an error scope; remembers which one.
    Error { scope: String },
}

/// A named function.
pub struct FunctionDescriptor {
    name: Name,
    containing: Declaration,
    type_parameters: Vec<Arc<TypeParameterDescriptor>>,
    value_parameters: Vec<ValueParameterDescriptor>,
    extension_receiver: Option<ReceiverParameterDescriptor>,
    return_type: Option<Type>,
    modality: Modality,
    visibility: Visibility,
    origin: FunctionOrigin,
}

impl FunctionDescriptor {
    pub(crate) fn error(
        containing: Declaration,
        name: Name,
        scope: &str,
        return_type: Type,
    ) -> Self {
        FunctionDescriptor {
            name,
            containing,
            type_parameters: Vec::new(),
            value_parameters: Vec::new(),
            extension_receiver: None,
            return_type: Some(return_type),
            modality: Modality::Open,
            visibility: Visibility::Internal,
            origin: FunctionOrigin::Error {
                scope: scope.to_owned(),
            },
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn containing_declaration(&self) -> &Declaration {
        &self.containing
    }

    pub fn type_parameters(&self) -> &[Arc<TypeParameterDescriptor>] {
        &self.type_parameters
    }

    pub fn value_parameters(&self) -> &[ValueParameterDescriptor] {
        &self.value_parameters
    }

    pub fn extension_receiver_parameter(&self) -> Option<&ReceiverParameterDescriptor> {
        self.extension_receiver.as_ref()
    }

    /// `None` while the return type is still being inferred.
    pub fn return_type(&self) -> Option<&Type> {
        self.return_type.as_ref()
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Debug label of the error scope that produced this function.
    pub fn error_scope_label(&self) -> Option<&str> {
        match &self.origin {
            FunctionOrigin::Declared => None,
            FunctionOrigin::Error { scope } => Some(scope),
        }
    }
}

impl fmt::Debug for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionDescriptor({})", self.name)
    }
}

/// Builds a declared function.
pub struct FunctionBuilder {
    containing: Declaration,
    name: Name,
    type_parameters: Vec<(Name, Variance, Vec<Type>)>,
    value_parameters: Vec<(Name, Type)>,
    extension_receiver: Option<Type>,
    return_type: Option<Type>,
    modality: Modality,
    visibility: Visibility,
}

impl FunctionBuilder {
    pub fn new(containing: Declaration, name: Name) -> Self {
        FunctionBuilder {
            containing,
            name,
            type_parameters: Vec::new(),
            value_parameters: Vec::new(),
            extension_receiver: None,
            return_type: None,
            modality: Modality::Final,
            visibility: Visibility::Public,
        }
    }

    /// Add a type parameter. An empty bound list means `Any?`.
    #[must_use]
    pub fn type_parameter(mut self, name: Name, variance: Variance, upper_bounds: Vec<Type>) -> Self {
        self.type_parameters.push((name, variance, upper_bounds));
        self
    }

    #[must_use]
    pub fn value_parameter(mut self, name: Name, ty: Type) -> Self {
        self.value_parameters.push((name, ty));
        self
    }

    #[must_use]
    pub fn extension_receiver(mut self, ty: Type) -> Self {
        self.extension_receiver = Some(ty);
        self
    }

    #[must_use]
    pub fn return_type(mut self, ty: Type) -> Self {
        self.return_type = Some(ty);
        self
    }

    #[must_use]
    pub fn modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn build(self) -> Arc<FunctionDescriptor> {
        let FunctionBuilder {
            containing,
            name,
            type_parameters,
            value_parameters,
            extension_receiver,
            return_type,
            modality,
            visibility,
        } = self;

        let value_parameters = value_parameters
            .into_iter()
            .enumerate()
            .map(|(index, (name, ty))| ValueParameterDescriptor::new(name, index, ty))
            .collect();

        Arc::new_cyclic(|this| {
            let type_parameters = type_parameters
                .into_iter()
                .enumerate()
                .map(|(index, (name, variance, upper_bounds))| {
                    let owner = DeclarationLink::Function(Weak::clone(this));
                    let parameter = if upper_bounds.is_empty() {
                        TypeParameterDescriptor::with_default_bound(owner, false, variance, name, index)
                    } else {
                        TypeParameterDescriptor::new(owner, name, index, variance, false, upper_bounds)
                    };
                    Arc::new(parameter)
                })
                .collect();

            FunctionDescriptor {
                name,
                containing,
                type_parameters,
                value_parameters,
                extension_receiver: extension_receiver.map(ReceiverParameterDescriptor::new),
                return_type,
                modality,
                visibility,
                origin: FunctionOrigin::Declared,
            }
        })
    }
}

/// A property (`let`/`var` member).
pub struct PropertyDescriptor {
    name: Name,
    containing: Declaration,
    ty: Type,
    modality: Modality,
    visibility: Visibility,
    is_var: bool,
}

impl PropertyDescriptor {
    pub fn new(
        containing: Declaration,
        name: Name,
        ty: Type,
        modality: Modality,
        visibility: Visibility,
        is_var: bool,
    ) -> Self {
        PropertyDescriptor {
            name,
            containing,
            ty,
            modality,
            visibility,
            is_var,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn containing_declaration(&self) -> &Declaration {
        &self.containing
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_var(&self) -> bool {
        self.is_var
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyDescriptor({}: {})", self.name, self.ty)
    }
}
