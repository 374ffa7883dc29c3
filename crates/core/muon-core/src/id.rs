//! Type-safe identifiers for self-test resources.
//!
//! Core ids and routine indices are both small unsigned integers; the
//! newtype keeps them from being swapped at a call site that takes both.

use core::fmt;

/// CPU core identifier.
///
/// Bounded by the engine's `CORES` dimension; single-core configurations
/// only ever use [`CoreId::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CoreId(u32);

impl CoreId {
    /// Core 0, the only valid core in single-core configurations.
    pub const ZERO: Self = Self(0);

    /// Creates a new `CoreId`.
    pub const fn new(val: u32) -> Self {
        Self(val)
    }

    /// Returns the raw `u32` value.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the value as `usize` (convenience for indexing).
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_id_roundtrip() {
        let id = CoreId::new(3);
        assert_eq!(id.as_u32(), 3);
        assert_eq!(id.as_usize(), 3);
    }

    #[test]
    fn core_id_zero() {
        assert_eq!(CoreId::ZERO, CoreId::new(0));
    }

    #[test]
    fn core_id_display() {
        assert_eq!(format!("{}", CoreId::new(1)), "1");
    }

    #[test]
    fn core_id_ordering() {
        assert!(CoreId::new(0) < CoreId::new(1));
    }
}
