//! Pre-computed type metadata flags.
//!
//! `TypeFlags` are computed once when a [`Type`](super::Type) is built and
//! cached, so "does this contain an error anywhere?" is a bit test instead
//! of a walk over the argument tree.
//!
//! Flags are split into:
//! - **Own flags**: properties of this type node only.
//! - **Presence flags**: properties of this node or any non-star argument,
//!   propagated upward at construction.

use bitflags::bitflags;

bitflags! {
    /// Cached type properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        // === Own Flags (bits 0-7) ===

        /// This node is an error sentinel.
        const IS_ERROR = 1 << 0;
        /// This node's constructor is the uninferred-parameter constructor.
        const IS_UNINFERRED = 1 << 1;
        /// Marked nullable (`T?`).
        const IS_NULLABLE = 1 << 2;

        // === Presence Flags (bits 8-15) ===

        /// An error sentinel occurs somewhere in this type.
        const HAS_ERROR = 1 << 8;
        /// An uninferred-parameter sentinel occurs somewhere in this type.
        const HAS_UNINFERRED = 1 << 9;
    }
}

impl TypeFlags {
    /// Flags inherited from argument types.
    pub const PROPAGATE_MASK: Self =
        Self::from_bits_truncate(Self::HAS_ERROR.bits() | Self::HAS_UNINFERRED.bits());

    #[inline]
    pub const fn has_errors(self) -> bool {
        self.contains(Self::HAS_ERROR)
    }

    #[inline]
    pub const fn has_uninferred(self) -> bool {
        self.contains(Self::HAS_UNINFERRED)
    }

    #[inline]
    pub const fn propagate_from(child: Self) -> Self {
        Self::from_bits_truncate(child.bits() & Self::PROPAGATE_MASK.bits())
    }

    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        children
            .into_iter()
            .fold(Self::empty(), |acc, child| acc.union(Self::propagate_from(child)))
    }
}
