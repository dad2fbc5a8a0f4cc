use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::DescriptorKindFilter;
use crate::descriptor::{Classifier, Declaration, FunctionDescriptor, PropertyDescriptor};
use crate::name::Name;

/// Members of a real declaration, indexed by name.
#[derive(Default)]
pub struct DeclaredScope {
    classifiers: FxHashMap<Name, Classifier>,
    functions: FxHashMap<Name, Vec<Arc<FunctionDescriptor>>>,
    variables: FxHashMap<Name, Vec<Arc<PropertyDescriptor>>>,
}

impl DeclaredScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later classifiers with the same name replace earlier ones.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifiers.insert(classifier.name().clone(), classifier);
        self
    }

    /// Functions with the same name accumulate as overloads.
    #[must_use]
    pub fn with_function(mut self, function: Arc<FunctionDescriptor>) -> Self {
        self.functions
            .entry(function.name().clone())
            .or_default()
            .push(function);
        self
    }

    #[must_use]
    pub fn with_variable(mut self, property: Arc<PropertyDescriptor>) -> Self {
        self.variables
            .entry(property.name().clone())
            .or_default()
            .push(property);
        self
    }

    /// Number of distinct member names across all kinds.
    pub fn len(&self) -> usize {
        self.classifiers.len() + self.functions.len() + self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn classifier(&self, name: &Name) -> Option<Classifier> {
        self.classifiers.get(name).cloned()
    }

    pub fn functions(&self, name: &Name) -> Vec<Arc<FunctionDescriptor>> {
        self.functions.get(name).cloned().unwrap_or_default()
    }

    pub fn variables(&self, name: &Name) -> Vec<Arc<PropertyDescriptor>> {
        self.variables.get(name).cloned().unwrap_or_default()
    }

    /// Matching members, ordered by name.
    pub fn descriptors(
        &self,
        kind_filter: DescriptorKindFilter,
        name_filter: impl Fn(&Name) -> bool,
    ) -> Vec<Declaration> {
        let mut result = Vec::new();

        if kind_filter.contains(DescriptorKindFilter::CLASSIFIERS) {
            result.extend(
                self.classifiers
                    .iter()
                    .filter(|&(name, _)| name_filter(name))
                    .map(|(_, classifier)| classifier.to_declaration()),
            );
        }
        if kind_filter.contains(DescriptorKindFilter::FUNCTIONS) {
            result.extend(
                self.functions
                    .iter()
                    .filter(|&(name, _)| name_filter(name))
                    .flat_map(|(_, overloads)| overloads.iter().cloned().map(Declaration::Function)),
            );
        }
        if kind_filter.contains(DescriptorKindFilter::VARIABLES) {
            result.extend(
                self.variables
                    .iter()
                    .filter(|&(name, _)| name_filter(name))
                    .flat_map(|(_, properties)| properties.iter().cloned().map(Declaration::Property)),
            );
        }

        result.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        result
    }

    pub(super) fn print_structure(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let mut names: Vec<&str> = self
            .classifiers
            .keys()
            .chain(self.functions.keys())
            .chain(self.variables.keys())
            .map(Name::as_str)
            .collect();
        names.sort_unstable();
        writeln!(out, "DeclaredScope: {}", names.join(", "))
    }
}
