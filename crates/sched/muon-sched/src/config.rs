//! Project default dimensions and engine aliases.
//!
//! The engine is dimensioned by const generics; these are the defaults a
//! single-core integration starts from. Targets with different routine
//! counts instantiate [`Scheduler`] with their own parameters instead of
//! editing these.

use crate::scheduler::Scheduler;

/// Number of CPU cores the default engine schedules for.
pub const NUM_CORES: usize = 1;

/// Capacity of the boot-time routine table.
pub const TOT_BT_ROUTINES: usize = 8;

/// Capacity of the runtime routine table.
pub const TOT_RT_ROUTINES: usize = 16;

/// Routines executed per runtime invocation under the chunked policy.
pub const CHUNK_SIZE: usize = 1;

const _: () = assert!(NUM_CORES >= 1, "at least one core must be configured");
const _: () = assert!(CHUNK_SIZE >= 1, "a zero chunk never makes progress");

/// Engine with the project default dimensions.
pub type DefaultScheduler<'a, V, P, B> =
    Scheduler<'a, V, P, B, NUM_CORES, TOT_BT_ROUTINES, TOT_RT_ROUTINES>;
