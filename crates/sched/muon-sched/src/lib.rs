//! Boot-time and runtime self-test scheduling engine.
//!
//! Composes the routine registry, the scheduling policies, and the
//! [`Scheduler`] that drives registered routines through the
//! [`TestSupport`](muon_tssp::TestSupport) bracket discipline and records
//! their signatures in the [`SignatureStore`](muon_core::SignatureStore).
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut boot = RoutineSet::<TOT_BT_ROUTINES>::new();
//! boot.register(&cpu_regs_test)?;
//! let mut runtime = RoutineSet::<TOT_RT_ROUTINES>::new();
//! runtime.register(&alu_test)?;
//! runtime.register(&march_test)?;
//!
//! let mut engine = Scheduler::<_, _, _, NUM_CORES, TOT_BT_ROUTINES, TOT_RT_ROUTINES>::new(
//!     boot, runtime, GoldenTable::new(BT_GOLDEN, RT_GOLDEN),
//!     Chunked::new(CHUNK_SIZE), Mpc5777Support::new(),
//! );
//! engine.init()?;
//! engine.schedule_boot(CoreId::ZERO)?;    // once, during bring-up
//! engine.schedule_runtime(CoreId::ZERO)?; // every tick thereafter
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod config;
pub mod policy;
pub mod registry;
pub mod scheduler;

pub use policy::{Chunked, Custom, SchedulingPolicy, Sequential};
pub use registry::{RoutineSet, TestRoutine};
pub use scheduler::{Scheduler, SweepState};
