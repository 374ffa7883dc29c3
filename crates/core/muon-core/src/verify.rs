//! Signature comparison policies.
//!
//! Where golden reference values come from is integration-specific: some
//! targets link a build-time table next to the test image, others derive
//! expected values during commissioning. The store therefore takes the
//! comparison as an injected policy instead of assuming a source.

use crate::sig::{Signature, TestSpace};

/// Decides whether a computed signature is acceptable.
///
/// Invoked by [`SignatureStore::update`](crate::store::SignatureStore::update)
/// for every recorded signature; a `false` return latches the record's
/// `MISMATCH` flag.
pub trait SignatureVerifier {
    /// Returns `true` when `signature` is acceptable for the routine at
    /// `index` in `space`.
    fn matches(&self, space: TestSpace, index: usize, signature: Signature) -> bool;
}

/// Accepts every signature; mismatch flags are never set.
///
/// The bring-up configuration, used before golden values exist for a
/// target — outcomes are still recorded and queryable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SignatureVerifier for AcceptAll {
    fn matches(&self, _space: TestSpace, _index: usize, _signature: Signature) -> bool {
        true
    }
}

/// Compares signatures against build-time golden tables, one per space.
///
/// An index with no golden entry cannot be judged and is treated as
/// matching.
#[derive(Debug, Clone, Copy)]
pub struct GoldenTable<'a> {
    boot: &'a [Signature],
    runtime: &'a [Signature],
}

impl<'a> GoldenTable<'a> {
    /// Creates a verifier over the given golden tables.
    pub const fn new(boot: &'a [Signature], runtime: &'a [Signature]) -> Self {
        Self { boot, runtime }
    }
}

impl SignatureVerifier for GoldenTable<'_> {
    fn matches(&self, space: TestSpace, index: usize, signature: Signature) -> bool {
        let table = match space {
            TestSpace::Boot => self.boot,
            TestSpace::Runtime => self.runtime,
        };
        match table.get(index) {
            Some(expected) => *expected == signature,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_all_accepts() {
        assert!(AcceptAll.matches(TestSpace::Boot, 0, Signature::ZERO));
        assert!(AcceptAll.matches(TestSpace::Runtime, 99, Signature::new(0xFF)));
    }

    #[test]
    fn golden_table_compares_per_space() {
        let boot = [Signature::new(1), Signature::new(2)];
        let runtime = [Signature::new(3)];
        let golden = GoldenTable::new(&boot, &runtime);

        assert!(golden.matches(TestSpace::Boot, 0, Signature::new(1)));
        assert!(!golden.matches(TestSpace::Boot, 1, Signature::new(1)));
        assert!(golden.matches(TestSpace::Runtime, 0, Signature::new(3)));
        assert!(!golden.matches(TestSpace::Runtime, 0, Signature::new(1)));
    }

    #[test]
    fn golden_table_unlisted_index_matches() {
        let golden = GoldenTable::new(&[], &[]);
        assert!(golden.matches(TestSpace::Boot, 5, Signature::new(0xAB)));
    }
}
