//! Built-in declarations.
//!
//! The semantic model only needs the built-ins for one thing: the default
//! upper bound of a type parameter, `Any?`. Everything else treats
//! [`BuiltIns`] as an opaque handle.

use std::sync::{Arc, OnceLock};

use crate::descriptor::{ClassBuilder, ClassDescriptor, ClassKind, Declaration, ModuleDescriptor};
use crate::name::{FqName, Name};
use crate::types::Type;

/// Registry of built-in declarations.
pub struct BuiltIns {
    module: Arc<ModuleDescriptor>,
    any: Arc<ClassDescriptor>,
}

static DEFAULT_BUILT_INS: OnceLock<BuiltIns> = OnceLock::new();

impl BuiltIns {
    /// The process-wide default built-ins.
    pub fn default_instance() -> &'static BuiltIns {
        DEFAULT_BUILT_INS.get_or_init(|| {
            tracing::debug!("initializing default built-ins");
            BuiltIns::new()
        })
    }

    fn new() -> Self {
        let module = Arc::new(ModuleDescriptor::declared(
            Name::special("<built-ins module>"),
            vec![FqName::parse("ori")],
        ));
        let any = ClassBuilder::new(
            Declaration::Module(Arc::clone(&module)),
            Name::identifier("Any"),
            ClassKind::Class,
        )
        .build();
        BuiltIns { module, any }
    }

    pub fn built_ins_module(&self) -> &Arc<ModuleDescriptor> {
        &self.module
    }

    pub fn any(&self) -> &Arc<ClassDescriptor> {
        &self.any
    }

    pub fn any_type(&self) -> Type {
        Type::of_class(&self.any, Vec::new(), false)
    }

    /// `Any?`: the implicit upper bound of every type parameter.
    pub fn nullable_any_type(&self) -> Type {
        Type::of_class(&self.any, Vec::new(), true)
    }
}
