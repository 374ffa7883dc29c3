//! Test Setup Support Package (TSSP) interface.
//!
//! Self-test routines exercise hardware in ways normal code must never
//! see: alternate interrupt vectors, deliberately provoked exceptions,
//! scratch register state. The scheduler brackets every routine with the
//! hooks on [`TestSupport`] so that the machine is configured before a
//! routine runs and restored before anything else executes, and wraps each
//! whole boot sweep in a vector-table swap.
//!
//! Implementations are hardware-specific and supplied by the integrator;
//! this crate defines only the call discipline the engine relies on, plus
//! [`NullSupport`] for hosts and early bring-up where no setup is needed.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

use muon_core::{CoreId, SelfTestError};

/// Hardware setup and restore hooks around self-test execution.
///
/// The engine guarantees the pairing discipline: a successful `*_setup`
/// for a routine is always followed by the matching `*_restore` before the
/// sweep returns (even when the routine's signature mismatches), and a
/// `swap_vectors` is always followed by `restore_vectors` (even when the
/// sweep aborts). A failed `*_setup` skips the routine and its restore.
pub trait TestSupport {
    /// Installs the alternate interrupt-vector configuration for a
    /// boot-time sweep.
    fn swap_vectors(&mut self);

    /// Reinstates the normal interrupt-vector configuration after a
    /// boot-time sweep.
    fn restore_vectors(&mut self);

    /// Prepares the hardware for one boot-time routine.
    fn boot_setup(&mut self, core: CoreId, index: usize) -> Result<(), SelfTestError>;

    /// Reverts the hardware changes of [`boot_setup`](Self::boot_setup).
    fn boot_restore(&mut self, core: CoreId, index: usize) -> Result<(), SelfTestError>;

    /// Prepares the hardware for one runtime routine.
    fn runtime_setup(&mut self, core: CoreId, index: usize) -> Result<(), SelfTestError>;

    /// Reverts the hardware changes of [`runtime_setup`](Self::runtime_setup).
    fn runtime_restore(&mut self, core: CoreId, index: usize) -> Result<(), SelfTestError>;

    /// Arms the watchdog before a routine executes, bounding a hung test.
    ///
    /// Default: no-op, for targets where the watchdog runs free or is
    /// managed elsewhere.
    fn watchdog_arm(&mut self) {}

    /// Disarms the watchdog after a routine completes.
    ///
    /// Default: no-op.
    fn watchdog_disarm(&mut self) {}
}

/// A bridge that performs no hardware work.
///
/// Every hook succeeds without side effects. Used on the host, in tests,
/// and on targets whose routines need no per-test configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSupport;

impl TestSupport for NullSupport {
    fn swap_vectors(&mut self) {}

    fn restore_vectors(&mut self) {}

    fn boot_setup(&mut self, _core: CoreId, _index: usize) -> Result<(), SelfTestError> {
        Ok(())
    }

    fn boot_restore(&mut self, _core: CoreId, _index: usize) -> Result<(), SelfTestError> {
        Ok(())
    }

    fn runtime_setup(&mut self, _core: CoreId, _index: usize) -> Result<(), SelfTestError> {
        Ok(())
    }

    fn runtime_restore(&mut self, _core: CoreId, _index: usize) -> Result<(), SelfTestError> {
        Ok(())
    }
}
