//! Per-core signature bookkeeping.
//!
//! The [`SignatureStore`] owns one [`SignatureRecord`] per (routine, core)
//! slot for each test space, plus an incrementally tracked last-failure
//! snapshot per core. All storage is fixed-size arrays dimensioned by const
//! generics; nothing is allocated and nothing is shared — the single-writer
//! contract is structural (`&mut self` on every mutation).

use planck_noalloc::vec::ArrayVec;

use crate::error::SelfTestError;
use crate::id::CoreId;
use crate::sig::{FailedTest, RecordFlags, Signature, SignatureRecord, TestSpace};
use crate::verify::SignatureVerifier;

/// Fixed-size signature tables for `CORES` cores, `BT` boot-time routines,
/// and `RT` runtime routines, with an injected comparison policy `V`.
///
/// Records are zero-valued until their routine first executes; a record is
/// overwritten exactly once per execution and reset only by [`init`].
///
/// [`init`]: SignatureStore::init
pub struct SignatureStore<V, const CORES: usize, const BT: usize, const RT: usize> {
    boot: [[SignatureRecord; BT]; CORES],
    runtime: [[SignatureRecord; RT]; CORES],
    last_failed: [Option<(TestSpace, FailedTest)>; CORES],
    verifier: V,
}

impl<V, const CORES: usize, const BT: usize, const RT: usize> SignatureStore<V, CORES, BT, RT>
where
    V: SignatureVerifier,
{
    /// Creates a store with every record zeroed.
    pub const fn new(verifier: V) -> Self {
        Self {
            boot: [[SignatureRecord::ZEROED; BT]; CORES],
            runtime: [[SignatureRecord::ZEROED; RT]; CORES],
            last_failed: [None; CORES],
            verifier,
        }
    }

    /// Zero-fills every record and clears the last-failure snapshots.
    ///
    /// Idempotent; a freshly constructed store is already in this state.
    pub fn init(&mut self) {
        for core in 0..CORES {
            self.boot[core] = [SignatureRecord::ZEROED; BT];
            self.runtime[core] = [SignatureRecord::ZEROED; RT];
            self.last_failed[core] = None;
        }
    }

    /// Routine count for a space.
    const fn total(space: TestSpace) -> usize {
        match space {
            TestSpace::Boot => BT,
            TestSpace::Runtime => RT,
        }
    }

    fn core_index(core: CoreId) -> Result<usize, SelfTestError> {
        let index = core.as_usize();
        if index >= CORES {
            return Err(SelfTestError::CpuOutOfBounds);
        }
        Ok(index)
    }

    fn records(&self, core: usize, space: TestSpace) -> &[SignatureRecord] {
        match space {
            TestSpace::Boot => &self.boot[core],
            TestSpace::Runtime => &self.runtime[core],
        }
    }

    /// Overwrites the record for (`core`, `space`, `index`) and evaluates
    /// the comparison policy. Returns `true` when the new signature was
    /// flagged as a mismatch.
    ///
    /// This is a side effect with no error path: an out-of-range core or
    /// index writes nothing and returns `false`. The scheduler bounds its
    /// loops so in-contract callers never hit that case.
    pub fn update(
        &mut self,
        core: CoreId,
        space: TestSpace,
        index: usize,
        signature: Signature,
    ) -> bool {
        let Ok(core_idx) = Self::core_index(core) else {
            return false;
        };
        if index >= Self::total(space) {
            return false;
        }

        let matched = self.verifier.matches(space, index, signature);
        let mut flags = RecordFlags::VALID;
        if !matched {
            flags |= RecordFlags::MISMATCH;
        }
        let record = SignatureRecord { signature, flags };
        match space {
            TestSpace::Boot => self.boot[core_idx][index] = record,
            TestSpace::Runtime => self.runtime[core_idx][index] = record,
        }

        if !matched {
            self.last_failed[core_idx] = Some((space, FailedTest { index, signature }));
            log::warn!(
                "signature mismatch: core {core} {} routine {index}: {signature}",
                space.as_str(),
            );
        }
        !matched
    }

    /// Returns the stored signature for (`core`, `space`, `index`).
    ///
    /// Rejects `core >= CORES` with [`SelfTestError::CpuOutOfBounds`] and
    /// `index >= TOT` with [`SelfTestError::IndexOutOfBounds`] before any
    /// array access.
    pub fn query_signature(
        &self,
        core: CoreId,
        space: TestSpace,
        index: usize,
    ) -> Result<Signature, SelfTestError> {
        let core_idx = Self::core_index(core)?;
        if index >= Self::total(space) {
            return Err(SelfTestError::IndexOutOfBounds);
        }
        Ok(self.records(core_idx, space)[index].signature)
    }

    /// Returns a copy of the full record for (`core`, `space`, `index`).
    pub fn record(
        &self,
        core: CoreId,
        space: TestSpace,
        index: usize,
    ) -> Result<SignatureRecord, SelfTestError> {
        let core_idx = Self::core_index(core)?;
        if index >= Self::total(space) {
            return Err(SelfTestError::IndexOutOfBounds);
        }
        Ok(self.records(core_idx, space)[index])
    }

    /// Returns the lowest routine index in `space` whose record is flagged
    /// as a mismatch, or `None` if nothing in that space has failed.
    ///
    /// The scan runs in index order; the minimality of the returned index
    /// determines which failure a safety monitor sees first.
    pub fn first_failed(
        &self,
        core: CoreId,
        space: TestSpace,
    ) -> Result<Option<usize>, SelfTestError> {
        let core_idx = Self::core_index(core)?;
        Ok(self
            .records(core_idx, space)
            .iter()
            .position(SignatureRecord::is_mismatch))
    }

    /// Returns every failed boot-time entry for `core`, in index order.
    pub fn all_failed_boot(
        &self,
        core: CoreId,
    ) -> Result<ArrayVec<FailedTest, BT>, SelfTestError> {
        let core_idx = Self::core_index(core)?;
        Ok(Self::collect_failed(&self.boot[core_idx]))
    }

    /// Returns every failed runtime entry for `core`, in index order.
    pub fn all_failed_runtime(
        &self,
        core: CoreId,
    ) -> Result<ArrayVec<FailedTest, RT>, SelfTestError> {
        let core_idx = Self::core_index(core)?;
        Ok(Self::collect_failed(&self.runtime[core_idx]))
    }

    fn collect_failed<const N: usize>(records: &[SignatureRecord; N]) -> ArrayVec<FailedTest, N> {
        let mut failed = ArrayVec::new();
        for (index, record) in records.iter().enumerate() {
            if record.is_mismatch() {
                failed.push(FailedTest {
                    index,
                    signature: record.signature,
                });
            }
        }
        failed
    }

    /// Returns the most recently recorded failure for `core` across both
    /// spaces. An O(1) read of the incrementally tracked snapshot, not a
    /// scan.
    pub fn last_failed(
        &self,
        core: CoreId,
    ) -> Result<Option<(TestSpace, FailedTest)>, SelfTestError> {
        let core_idx = Self::core_index(core)?;
        Ok(self.last_failed[core_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::{AcceptAll, GoldenTable};

    const CORE0: CoreId = CoreId::ZERO;
    const CORE1: CoreId = CoreId::new(1);

    type Store<V> = SignatureStore<V, 2, 3, 4>;

    #[test]
    fn update_then_query_roundtrip() {
        let mut store: Store<AcceptAll> = SignatureStore::new(AcceptAll);
        let mismatch = store.update(CORE0, TestSpace::Runtime, 2, Signature::new(0xBEEF));
        assert!(!mismatch);
        assert_eq!(
            store.query_signature(CORE0, TestSpace::Runtime, 2),
            Ok(Signature::new(0xBEEF))
        );
    }

    #[test]
    fn query_rejects_index_at_count() {
        let store: Store<AcceptAll> = SignatureStore::new(AcceptAll);
        // Strict bound: index == count is already out of range.
        assert_eq!(
            store.query_signature(CORE0, TestSpace::Boot, 3),
            Err(SelfTestError::IndexOutOfBounds)
        );
        assert_eq!(
            store.query_signature(CORE0, TestSpace::Runtime, 4),
            Err(SelfTestError::IndexOutOfBounds)
        );
    }

    #[test]
    fn query_rejects_core_at_count() {
        let store: Store<AcceptAll> = SignatureStore::new(AcceptAll);
        assert_eq!(
            store.query_signature(CoreId::new(2), TestSpace::Boot, 0),
            Err(SelfTestError::CpuOutOfBounds)
        );
    }

    #[test]
    fn update_out_of_range_writes_nothing() {
        let mut store: Store<AcceptAll> = SignatureStore::new(AcceptAll);
        assert!(!store.update(CORE0, TestSpace::Boot, 3, Signature::new(1)));
        assert!(!store.update(CoreId::new(9), TestSpace::Boot, 0, Signature::new(1)));
        for index in 0..3 {
            let record = store.record(CORE0, TestSpace::Boot, index).unwrap();
            assert!(!record.is_valid());
        }
    }

    #[test]
    fn update_marks_record_valid() {
        let mut store: Store<AcceptAll> = SignatureStore::new(AcceptAll);
        store.update(CORE0, TestSpace::Boot, 0, Signature::ZERO);
        let record = store.record(CORE0, TestSpace::Boot, 0).unwrap();
        assert!(record.is_valid());
        assert!(!record.is_mismatch());
        // A computed zero signature is distinguishable from an unexecuted slot.
        let untouched = store.record(CORE0, TestSpace::Boot, 1).unwrap();
        assert!(!untouched.is_valid());
    }

    #[test]
    fn mismatch_flag_follows_verifier() {
        let golden = [Signature::new(0xA), Signature::new(0xB), Signature::new(0xC)];
        let mut store: Store<GoldenTable<'_>> =
            SignatureStore::new(GoldenTable::new(&golden, &[]));
        assert!(!store.update(CORE0, TestSpace::Boot, 0, Signature::new(0xA)));
        assert!(store.update(CORE0, TestSpace::Boot, 1, Signature::new(0xFF)));
        let record = store.record(CORE0, TestSpace::Boot, 1).unwrap();
        assert!(record.is_mismatch());
        assert_eq!(record.signature, Signature::new(0xFF));
    }

    #[test]
    fn first_failed_returns_lowest_index() {
        let golden = [Signature::ZERO; 4];
        let mut store: Store<GoldenTable<'_>> =
            SignatureStore::new(GoldenTable::new(&[], &golden));
        store.update(CORE0, TestSpace::Runtime, 3, Signature::new(1));
        store.update(CORE0, TestSpace::Runtime, 1, Signature::new(1));
        assert_eq!(store.first_failed(CORE0, TestSpace::Runtime), Ok(Some(1)));
    }

    #[test]
    fn first_failed_none_when_clean() {
        let mut store: Store<AcceptAll> = SignatureStore::new(AcceptAll);
        store.update(CORE0, TestSpace::Runtime, 0, Signature::new(7));
        assert_eq!(store.first_failed(CORE0, TestSpace::Runtime), Ok(None));
        assert_eq!(store.first_failed(CORE0, TestSpace::Boot), Ok(None));
    }

    #[test]
    fn all_failed_in_index_order_with_signatures() {
        let golden = [Signature::ZERO; 4];
        let mut store: Store<GoldenTable<'_>> =
            SignatureStore::new(GoldenTable::new(&[], &golden));
        store.update(CORE0, TestSpace::Runtime, 2, Signature::new(0x22));
        store.update(CORE0, TestSpace::Runtime, 0, Signature::new(0x11));
        let failed = store.all_failed_runtime(CORE0).unwrap();
        assert_eq!(
            failed.as_slice(),
            &[
                FailedTest {
                    index: 0,
                    signature: Signature::new(0x11)
                },
                FailedTest {
                    index: 2,
                    signature: Signature::new(0x22)
                },
            ]
        );
    }

    #[test]
    fn last_failed_tracks_most_recent_across_spaces() {
        let mut store: Store<GoldenTable<'_>> =
            SignatureStore::new(GoldenTable::new(&[Signature::ZERO; 3], &[Signature::ZERO; 4]));
        assert_eq!(store.last_failed(CORE0), Ok(None));

        store.update(CORE0, TestSpace::Boot, 1, Signature::new(0xB1));
        store.update(CORE0, TestSpace::Runtime, 2, Signature::new(0xF2));
        let last = store.last_failed(CORE0).unwrap().unwrap();
        assert_eq!(last.0, TestSpace::Runtime);
        assert_eq!(last.1.index, 2);
    }

    #[test]
    fn cores_are_isolated() {
        let mut store: Store<AcceptAll> = SignatureStore::new(AcceptAll);
        store.update(CORE0, TestSpace::Runtime, 0, Signature::new(0x77));
        assert_eq!(
            store.query_signature(CORE1, TestSpace::Runtime, 0),
            Ok(Signature::ZERO)
        );
        assert!(!store.record(CORE1, TestSpace::Runtime, 0).unwrap().is_valid());
    }

    #[test]
    fn init_is_idempotent_and_resets() {
        let golden = [Signature::ZERO; 3];
        let mut store: Store<GoldenTable<'_>> =
            SignatureStore::new(GoldenTable::new(&golden, &[]));
        store.update(CORE0, TestSpace::Boot, 0, Signature::new(1));
        assert!(store.last_failed(CORE0).unwrap().is_some());

        store.init();
        store.init();
        assert_eq!(store.last_failed(CORE0), Ok(None));
        assert_eq!(
            store.query_signature(CORE0, TestSpace::Boot, 0),
            Ok(Signature::ZERO)
        );
        assert!(!store.record(CORE0, TestSpace::Boot, 0).unwrap().is_valid());
    }
}
