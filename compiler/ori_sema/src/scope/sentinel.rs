//! Error scope variants.

use std::sync::{Arc, OnceLock};

use crate::descriptor::{Classifier, FunctionDescriptor, PropertyDescriptor};
use crate::error::{self, misuse, ErrorSentinels, SentinelMisuse};
use crate::name::Name;

/// Scope that answers every lookup with sentinels.
///
/// - classifier lookup: a fresh error class labelled with the looked-up name
/// - function lookup: this scope's error function (created once, reused)
/// - variable lookup: the shared error property
/// - enumeration: nothing
pub struct ErrorScope {
    debug_message: String,
    error_function: OnceLock<Arc<FunctionDescriptor>>,
}

impl ErrorScope {
    pub(super) fn new(debug_message: &str) -> Self {
        ErrorScope {
            debug_message: debug_message.to_owned(),
            error_function: OnceLock::new(),
        }
    }

    pub fn debug_message(&self) -> &str {
        &self.debug_message
    }

    pub(super) fn contributed_classifier(&self, name: &Name) -> Classifier {
        tracing::trace!(scope = %self.debug_message, %name, "error scope classifier lookup");
        Classifier::Class(error::create_error_class(name.as_str()))
    }

    pub(super) fn contributed_variables(&self) -> Vec<Arc<PropertyDescriptor>> {
        ErrorSentinels::global().error_property_group()
    }

    pub(super) fn contributed_functions(&self) -> Vec<Arc<FunctionDescriptor>> {
        vec![Arc::clone(self.error_function())]
    }

    /// The one function this scope hands out for every function name.
    pub fn error_function(&self) -> &Arc<FunctionDescriptor> {
        self.error_function
            .get_or_init(|| error::create_error_function(&self.debug_message))
    }
}

/// Scope that faults on every lookup.
pub struct ThrowingScope {
    debug_message: String,
}

impl ThrowingScope {
    pub(super) fn new(debug_message: &str) -> Self {
        ThrowingScope {
            debug_message: debug_message.to_owned(),
        }
    }

    pub fn debug_message(&self) -> &str {
        &self.debug_message
    }

    pub(super) fn fail(&self, operation: &'static str) -> ! {
        misuse(SentinelMisuse::ThrowingScopeQueried {
            scope: self.debug_message.clone(),
            operation,
        })
    }
}
