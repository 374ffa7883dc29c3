//! Routine registry: ordered, fixed-capacity tables of test callables.
//!
//! Routines are registered once at startup and the table is read-only
//! afterwards; the index a routine receives at registration identifies it
//! for the rest of the process lifetime (signature queries, failure
//! reports, golden tables all key on it).

use muon_core::{SelfTestError, Signature};
use planck_noalloc::vec::ArrayVec;

/// A single self-test routine.
///
/// The engine treats routines as opaque: no arguments, one computed
/// [`Signature`] out. Test kernels, scratch memory, and register choreography
/// live entirely behind this trait.
pub trait TestRoutine {
    /// Executes the routine and returns its computed signature.
    fn run(&self) -> Signature;
}

impl<F> TestRoutine for F
where
    F: Fn() -> Signature,
{
    fn run(&self) -> Signature {
        self()
    }
}

/// Ordered, fixed-capacity routine table for one test space.
///
/// Indices are 0-based and contiguous with no gaps. The set performs no
/// execution and no bounds policing of its own — the scheduler bounds its
/// loops to [`len`](Self::len).
pub struct RoutineSet<'a, const N: usize> {
    routines: ArrayVec<&'a dyn TestRoutine, N>,
}

impl<'a, const N: usize> RoutineSet<'a, N> {
    /// Creates an empty routine table.
    pub const fn new() -> Self {
        Self {
            routines: ArrayVec::new(),
        }
    }

    /// Registers a routine and returns its assigned index.
    ///
    /// Fails with [`SelfTestError::IndexOutOfBounds`] once the table holds
    /// `N` routines — the index a further routine would receive is outside
    /// the space.
    pub fn register(&mut self, routine: &'a dyn TestRoutine) -> Result<usize, SelfTestError> {
        if self.routines.is_full() {
            return Err(SelfTestError::IndexOutOfBounds);
        }
        let index = self.routines.len();
        self.routines.push(routine);
        Ok(index)
    }

    /// Returns the routine at `index`, or `None` past the registered count.
    pub fn get(&self, index: usize) -> Option<&'a dyn TestRoutine> {
        if index < self.routines.len() {
            Some(self.routines[index])
        } else {
            None
        }
    }

    /// Returns the routines in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'a dyn TestRoutine> + '_ {
        self.routines.iter().copied()
    }

    /// Number of registered routines.
    pub fn len(&self) -> usize {
        self.routines.len()
    }

    /// Returns `true` if no routine is registered.
    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

impl<const N: usize> Default for RoutineSet<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
