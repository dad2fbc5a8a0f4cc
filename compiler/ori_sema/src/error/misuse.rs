//! Faults for querying a sentinel that must never be queried.
//!
//! These are programming errors in the caller, not semantic failures in the
//! program being compiled, so they panic instead of returning `Err`.

use thiserror::Error;

/// A sentinel was asked for something it cannot answer.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SentinelMisuse {
    /// A throwing error scope was looked into.
    #[error("throwing scope `{scope}` was queried ({operation})")]
    ThrowingScopeQueried {
        scope: String,
        operation: &'static str,
    },

    /// The error module was asked for something that needs a real module
    /// graph.
    #[error("error module was queried ({operation})")]
    ErrorModuleQueried { operation: &'static str },
}

/// Log the fault and abort the current operation.
#[cold]
#[track_caller]
pub(crate) fn misuse(fault: SentinelMisuse) -> ! {
    tracing::error!(%fault, "sentinel misuse");
    panic!("{fault}")
}
