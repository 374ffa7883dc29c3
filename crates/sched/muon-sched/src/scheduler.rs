//! Boot and runtime sweep execution.
//!
//! One [`Scheduler`] instance owns every piece of mutable engine state:
//! the signature store, the per-core cursors and sweep states, the bridge,
//! and the policy. All scheduling operations take `&mut self`, which makes
//! the single-writer-per-core contract structural rather than advisory —
//! integrators that drive cores from independent contexts instantiate one
//! engine per core.

use core::ops::Range;

use muon_core::{
    CoreId, FailedTest, SelfTestError, Signature, SignatureRecord, SignatureStore,
    SignatureVerifier, TestSpace,
};
use muon_tssp::TestSupport;
use planck_noalloc::vec::ArrayVec;

use crate::policy::SchedulingPolicy;
use crate::registry::RoutineSet;

/// Progress of one core's boot-time sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepState {
    /// The sweep has not been started.
    Idle,
    /// The sweep is executing (observable only from within bridge hooks).
    Running,
    /// Every boot-time routine ran and recorded a matching signature.
    Completed,
    /// The sweep stopped early on a bridge error or signature mismatch.
    Aborted,
}

/// The self-test engine for `CORES` cores, `BT` boot-time routines, and
/// `RT` runtime routines.
///
/// `V` is the signature comparison policy, `P` the runtime scheduling
/// policy, and `B` the hardware bridge — all chosen at configuration time.
pub struct Scheduler<'a, V, P, B, const CORES: usize, const BT: usize, const RT: usize> {
    boot: RoutineSet<'a, BT>,
    runtime: RoutineSet<'a, RT>,
    store: SignatureStore<V, CORES, BT, RT>,
    policy: P,
    bridge: B,
    cursors: [usize; CORES],
    boot_states: [SweepState; CORES],
}

impl<'a, V, P, B, const CORES: usize, const BT: usize, const RT: usize>
    Scheduler<'a, V, P, B, CORES, BT, RT>
where
    V: SignatureVerifier,
    P: SchedulingPolicy,
    B: TestSupport,
{
    /// Creates an engine over routine tables assembled at startup.
    pub fn new(
        boot: RoutineSet<'a, BT>,
        runtime: RoutineSet<'a, RT>,
        verifier: V,
        policy: P,
        bridge: B,
    ) -> Self {
        Self {
            boot,
            runtime,
            store: SignatureStore::new(verifier),
            policy,
            bridge,
            cursors: [0; CORES],
            boot_states: [SweepState::Idle; CORES],
        }
    }

    /// Resets all records, cursors, and sweep states.
    ///
    /// Must run once before the first scheduling call; idempotent. A
    /// freshly constructed engine is already in the initialized state, so
    /// this exists for re-initialization after a fault response.
    pub fn init(&mut self) -> Result<(), SelfTestError> {
        self.store.init();
        self.cursors = [0; CORES];
        self.boot_states = [SweepState::Idle; CORES];
        Ok(())
    }

    /// Tears the engine down.
    ///
    /// There is no OS task or owned hardware to release in the core, so
    /// this is a state reset; the engine may be re-initialized and reused.
    pub fn deinit(&mut self) -> Result<(), SelfTestError> {
        self.init()
    }

    fn core_index(core: CoreId) -> Result<usize, SelfTestError> {
        let index = core.as_usize();
        if index >= CORES {
            return Err(SelfTestError::CpuOutOfBounds);
        }
        Ok(index)
    }

    /// Runs the complete boot-time sweep for `core` in one call.
    ///
    /// Routines execute in strictly increasing index order, each bracketed
    /// by the bridge's boot setup/restore pair, with the whole sweep
    /// bracketed by a vector-table swap. The first error aborts the
    /// remaining sweep; the vector restore still executes. Not resumable —
    /// intended for one-shot execution during bring-up.
    pub fn schedule_boot(&mut self, core: CoreId) -> Result<(), SelfTestError> {
        let core_idx = Self::core_index(core)?;
        if self.boot.is_empty() {
            return Err(SelfTestError::NotImplemented);
        }

        self.boot_states[core_idx] = SweepState::Running;
        log::debug!("boot sweep start: core {core}");
        self.bridge.swap_vectors();
        let outcome = self.boot_pass(core);
        self.bridge.restore_vectors();

        match outcome {
            Ok(()) => {
                self.boot_states[core_idx] = SweepState::Completed;
                log::debug!("boot sweep complete: core {core}");
                Ok(())
            }
            Err(err) => {
                self.boot_states[core_idx] = SweepState::Aborted;
                log::error!("boot sweep aborted: core {core}: {err}");
                Err(err)
            }
        }
    }

    fn boot_pass(&mut self, core: CoreId) -> Result<(), SelfTestError> {
        let Self {
            boot,
            store,
            bridge,
            ..
        } = self;
        for (index, routine) in boot.iter().enumerate() {
            bridge.boot_setup(core, index)?;
            bridge.watchdog_arm();
            let signature = routine.run();
            bridge.watchdog_disarm();
            let mismatch = store.update(core, TestSpace::Boot, index, signature);
            bridge.boot_restore(core, index)?;
            if mismatch {
                return Err(SelfTestError::SignatureMismatch);
            }
        }
        Ok(())
    }

    /// Runs one runtime invocation for `core` under the configured policy.
    ///
    /// The policy selects the index window; each routine in it executes
    /// bracketed by the bridge's runtime setup/restore pair. The per-core
    /// cursor advances by the number of routines actually executed and
    /// wraps to 0 when it reaches the routine count, marking the cycle
    /// complete. The first error aborts the call without disturbing the
    /// cursor beyond what already advanced.
    pub fn schedule_runtime(&mut self, core: CoreId) -> Result<(), SelfTestError> {
        let core_idx = Self::core_index(core)?;
        if self.runtime.is_empty() {
            return Err(SelfTestError::NotImplemented);
        }

        let total = self.runtime.len();
        let window = self.policy.window(self.cursors[core_idx], total)?;
        log::trace!(
            "runtime window: core {core} {}..{}",
            window.start,
            window.end
        );
        let outcome = self.runtime_window(core, core_idx, window);

        if self.cursors[core_idx] >= total {
            self.cursors[core_idx] = 0;
            log::debug!("runtime cycle complete: core {core}");
        }
        if let Err(err) = outcome {
            log::error!("runtime sweep aborted: core {core}: {err}");
            return Err(err);
        }
        Ok(())
    }

    fn runtime_window(
        &mut self,
        core: CoreId,
        core_idx: usize,
        window: Range<usize>,
    ) -> Result<(), SelfTestError> {
        let Self {
            runtime,
            store,
            bridge,
            cursors,
            ..
        } = self;
        for index in window {
            // A policy may hand back a window past the registered count;
            // execution is clamped here.
            let Some(routine) = runtime.get(index) else {
                break;
            };
            bridge.runtime_setup(core, index)?;
            bridge.watchdog_arm();
            let signature = routine.run();
            bridge.watchdog_disarm();
            let mismatch = store.update(core, TestSpace::Runtime, index, signature);
            bridge.runtime_restore(core, index)?;
            cursors[core_idx] = index + 1;
            if mismatch {
                return Err(SelfTestError::SignatureMismatch);
            }
        }
        Ok(())
    }

    /// Stored signature for (`core`, `space`, `index`).
    pub fn query_signature(
        &self,
        core: CoreId,
        space: TestSpace,
        index: usize,
    ) -> Result<Signature, SelfTestError> {
        self.store.query_signature(core, space, index)
    }

    /// Full record for (`core`, `space`, `index`).
    pub fn record(
        &self,
        core: CoreId,
        space: TestSpace,
        index: usize,
    ) -> Result<SignatureRecord, SelfTestError> {
        self.store.record(core, space, index)
    }

    /// Lowest failed routine index in `space` for `core`, if any.
    pub fn first_failed(
        &self,
        core: CoreId,
        space: TestSpace,
    ) -> Result<Option<usize>, SelfTestError> {
        self.store.first_failed(core, space)
    }

    /// Every failed boot-time entry for `core`, in index order.
    pub fn all_failed_boot(
        &self,
        core: CoreId,
    ) -> Result<ArrayVec<FailedTest, BT>, SelfTestError> {
        self.store.all_failed_boot(core)
    }

    /// Every failed runtime entry for `core`, in index order.
    pub fn all_failed_runtime(
        &self,
        core: CoreId,
    ) -> Result<ArrayVec<FailedTest, RT>, SelfTestError> {
        self.store.all_failed_runtime(core)
    }

    /// Most recent failure for `core` across both spaces. O(1).
    pub fn last_failed(
        &self,
        core: CoreId,
    ) -> Result<Option<(TestSpace, FailedTest)>, SelfTestError> {
        self.store.last_failed(core)
    }

    /// The persisted runtime cursor for `core`. 0 both before a cycle
    /// starts and after one completes.
    pub fn cursor(&self, core: CoreId) -> Result<usize, SelfTestError> {
        Ok(self.cursors[Self::core_index(core)?])
    }

    /// The boot sweep state for `core`.
    pub fn boot_state(&self, core: CoreId) -> Result<SweepState, SelfTestError> {
        Ok(self.boot_states[Self::core_index(core)?])
    }

    /// The signature store, for monitors that query records directly.
    pub fn store(&self) -> &SignatureStore<V, CORES, BT, RT> {
        &self.store
    }

    /// The hardware bridge.
    pub fn bridge(&self) -> &B {
        &self.bridge
    }
}
