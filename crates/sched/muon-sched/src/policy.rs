//! Runtime scheduling policies.
//!
//! The policy is a configuration choice, not a runtime one: it is a type
//! parameter of the [`Scheduler`](crate::Scheduler), so the dispatch
//! monomorphizes away and a target pays only for the policy it builds in.

use core::ops::Range;

use muon_core::SelfTestError;

/// Decides which window of routine indices one runtime invocation covers.
///
/// The scheduler passes in the persisted per-core cursor and the total
/// routine count; the policy returns the half-open index window to execute
/// in this call. The scheduler clamps execution to the registered count and
/// owns all cursor bookkeeping.
pub trait SchedulingPolicy {
    /// Returns the index window for this invocation.
    fn window(&mut self, cursor: usize, total: usize) -> Result<Range<usize>, SelfTestError>;
}

/// Runs every runtime routine in a single invocation.
///
/// No cursor state persists between calls: each invocation covers the full
/// space from index 0, so an aborted sweep restarts from the beginning on
/// the next call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl SchedulingPolicy for Sequential {
    fn window(&mut self, _cursor: usize, total: usize) -> Result<Range<usize>, SelfTestError> {
        Ok(0..total)
    }
}

/// Runs up to `chunk_size` routines per invocation, resuming at the cursor.
///
/// This is the mechanism that spreads a full test cycle across many
/// scheduler ticks: with `chunk_size = 1` and `n` routines, a cycle
/// completes after `n` invocations, each bounded by a single routine's
/// latency.
#[derive(Debug, Clone, Copy)]
pub struct Chunked {
    /// Maximum routines executed per invocation.
    pub chunk_size: usize,
}

impl Chunked {
    /// Creates a chunked policy executing up to `chunk_size` routines per
    /// invocation.
    pub const fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }
}

impl SchedulingPolicy for Chunked {
    fn window(&mut self, cursor: usize, total: usize) -> Result<Range<usize>, SelfTestError> {
        // A zero chunk would never make progress; treat it as one.
        let step = self.chunk_size.max(1);
        let end = cursor.saturating_add(step).min(total);
        Ok(cursor..end)
    }
}

/// Placeholder for an integrator-supplied policy.
///
/// Always fails with [`SelfTestError::CustomSchedulerNotImplemented`];
/// integrators substitute their own [`SchedulingPolicy`] type to take over
/// window selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Custom;

impl SchedulingPolicy for Custom {
    fn window(&mut self, _cursor: usize, _total: usize) -> Result<Range<usize>, SelfTestError> {
        Err(SelfTestError::CustomSchedulerNotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_covers_everything_from_zero() {
        assert_eq!(Sequential.window(0, 5), Ok(0..5));
        // Cursor state is ignored: a sequential sweep always restarts.
        assert_eq!(Sequential.window(3, 5), Ok(0..5));
    }

    #[test]
    fn chunked_advances_by_chunk() {
        let mut policy = Chunked::new(2);
        assert_eq!(policy.window(0, 5), Ok(0..2));
        assert_eq!(policy.window(2, 5), Ok(2..4));
        assert_eq!(policy.window(4, 5), Ok(4..5));
    }

    #[test]
    fn chunked_clamps_to_total() {
        let mut policy = Chunked::new(16);
        assert_eq!(policy.window(0, 3), Ok(0..3));
    }

    #[test]
    fn chunked_zero_still_progresses() {
        let mut policy = Chunked::new(0);
        assert_eq!(policy.window(1, 3), Ok(1..2));
    }

    #[test]
    fn custom_is_unimplemented() {
        assert_eq!(
            Custom.window(0, 3),
            Err(SelfTestError::CustomSchedulerNotImplemented)
        );
    }
}
