//! Module descriptors.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::Annotations;
use crate::builtins::BuiltIns;
use crate::error::{misuse, SentinelMisuse};
use crate::name::{FqName, Name};
use crate::types::TypeSubstitutor;

/// Typed key for a module capability.
///
/// Capabilities let subsystems attach data to a module without the module
/// knowing about them.
pub struct ModuleCapability<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> ModuleCapability<T> {
    pub const fn new(name: &'static str) -> Self {
        ModuleCapability {
            name,
            _value: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// An import every file in a module gets implicitly.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImportPath {
    fq_name: FqName,
    all_under: bool,
}

impl ImportPath {
    pub fn new(fq_name: FqName, all_under: bool) -> Self {
        ImportPath { fq_name, all_under }
    }

    pub fn fq_name(&self) -> &FqName {
        &self.fq_name
    }

    /// `ori.io.*` rather than `ori.io`.
    pub fn is_all_under(&self) -> bool {
        self.all_under
    }
}

impl fmt::Display for ImportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fq_name)?;
        if self.all_under {
            f.write_str(".*")?;
        }
        Ok(())
    }
}

/// A package as seen from one module.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PackageViewDescriptor {
    module: Name,
    fq_name: FqName,
}

impl PackageViewDescriptor {
    pub fn module_name(&self) -> &Name {
        &self.module
    }

    pub fn fq_name(&self) -> &FqName {
        &self.fq_name
    }
}

/// Mapping from platform classes to their Ori counterparts.
///
/// Platform interop is not modelled, so every real module maps nothing.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct PlatformClassMap {
    _private: (),
}

impl PlatformClassMap {
    pub const EMPTY: PlatformClassMap = PlatformClassMap { _private: () };
}

pub(crate) enum ModuleKind {
    Declared(DeclaredModule),
    /// Stand-in when no real module owns a failed resolution.
    Error,
}

pub(crate) struct DeclaredModule {
    packages: Vec<FqName>,
    default_imports: Vec<ImportPath>,
    capabilities: FxHashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

/// A compilation module: the top-level container of packages.
pub struct ModuleDescriptor {
    name: Name,
    kind: ModuleKind,
}

impl ModuleDescriptor {
    /// A real module containing `packages`.
    pub fn declared(name: Name, packages: Vec<FqName>) -> Self {
        ModuleDescriptor {
            name,
            kind: ModuleKind::Declared(DeclaredModule {
                packages,
                default_imports: Vec::new(),
                capabilities: FxHashMap::default(),
            }),
        }
    }

    pub(crate) fn error(name: Name) -> Self {
        ModuleDescriptor {
            name,
            kind: ModuleKind::Error,
        }
    }

    #[must_use]
    pub fn with_default_imports(mut self, imports: Vec<ImportPath>) -> Self {
        if let ModuleKind::Declared(module) = &mut self.kind {
            module.default_imports = imports;
        }
        self
    }

    #[must_use]
    pub fn with_capability<T: Any + Send + Sync>(
        mut self,
        key: &ModuleCapability<T>,
        value: T,
    ) -> Self {
        if let ModuleKind::Declared(module) = &mut self.kind {
            module.capabilities.insert(key.name, Arc::new(value));
        }
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Whether this is the error module. A kind check; identity-sensitive
    /// callers use [`crate::error::is_error`].
    pub(crate) fn is_error_module(&self) -> bool {
        matches!(self.kind, ModuleKind::Error)
    }

    pub fn capability<T: Any + Send + Sync>(&self, key: &ModuleCapability<T>) -> Option<Arc<T>> {
        match &self.kind {
            ModuleKind::Declared(module) => {
                let value = Arc::clone(module.capabilities.get(key.name)?);
                value.downcast::<T>().ok()
            }
            ModuleKind::Error => None,
        }
    }

    /// Needs a real module graph. Faults on the error module.
    pub fn platform_class_map(&self) -> PlatformClassMap {
        match &self.kind {
            ModuleKind::Declared(_) => PlatformClassMap::EMPTY,
            ModuleKind::Error => misuse(SentinelMisuse::ErrorModuleQueried {
                operation: "platform_class_map",
            }),
        }
    }

    pub fn default_imports(&self) -> &[ImportPath] {
        match &self.kind {
            ModuleKind::Declared(module) => &module.default_imports,
            ModuleKind::Error => &[],
        }
    }

    pub fn annotations(&self) -> Annotations {
        Annotations::EMPTY
    }

    /// Direct sub-packages of `fq_name` whose short name passes `name_filter`.
    pub fn sub_packages_of(
        &self,
        fq_name: &FqName,
        name_filter: impl Fn(&Name) -> bool,
    ) -> Vec<FqName> {
        match &self.kind {
            ModuleKind::Declared(module) => module
                .packages
                .iter()
                .filter(|package| package.parent().as_ref() == Some(fq_name))
                .filter(|package| package.short_name().is_some_and(&name_filter))
                .cloned()
                .collect(),
            ModuleKind::Error => Vec::new(),
        }
    }

    /// Needs a real module graph. Faults on the error module.
    pub fn package(&self, fq_name: &FqName) -> PackageViewDescriptor {
        match &self.kind {
            ModuleKind::Declared(_) => PackageViewDescriptor {
                module: self.name.clone(),
                fq_name: fq_name.clone(),
            },
            ModuleKind::Error => misuse(SentinelMisuse::ErrorModuleQueried {
                operation: "package",
            }),
        }
    }

    /// Modules are not generic; substitution is the identity.
    pub fn substitute(self: &Arc<Self>, _substitutor: &TypeSubstitutor) -> Arc<Self> {
        Arc::clone(self)
    }

    /// Whether `other` may see this module's internal declarations.
    pub fn is_friend(&self, other: &ModuleDescriptor) -> bool {
        match self.kind {
            ModuleKind::Declared(_) => std::ptr::eq(self, other),
            ModuleKind::Error => false,
        }
    }

    pub fn builtins(&self) -> &'static BuiltIns {
        BuiltIns::default_instance()
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleDescriptor({})", self.name)
    }
}
