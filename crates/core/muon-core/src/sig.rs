//! Signature values and per-routine result records.

use bitflags::bitflags;
use core::fmt;

/// Compact integer digest produced by one execution of a test routine.
///
/// The value summarizes the routine's outcome (typically a CRC or MISR
/// accumulation over the exercised hardware); the engine treats it as
/// opaque and only compares it against an expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Signature(u32);

impl Signature {
    /// The zero signature — the value every record holds before its
    /// routine has executed.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Signature`.
    pub const fn new(val: u32) -> Self {
        Self(val)
    }

    /// Returns the raw `u32` value.
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// The two independent routine index spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestSpace {
    /// Routines run once during system bring-up.
    Boot,
    /// Routines run repeatedly during normal operation.
    Runtime,
}

impl TestSpace {
    /// Returns a human-readable name for the space.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boot => "boot",
            Self::Runtime => "runtime",
        }
    }
}

bitflags! {
    /// Status flags attached to a [`SignatureRecord`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RecordFlags: u8 {
        /// The record has been written at least once since initialization.
        /// Distinguishes a computed zero signature from a slot whose
        /// routine has never run.
        const VALID = 1 << 0;
        /// The recorded signature did not match its expected value.
        const MISMATCH = 1 << 1;
    }
}

/// Last computed signature and status for one (routine, core) slot.
///
/// Created zero-valued at initialization, overwritten exactly once per
/// routine execution, and never destroyed — re-initialization is the only
/// way to reset it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureRecord {
    /// The most recently recorded signature.
    pub signature: Signature,
    /// Validity and mismatch status.
    pub flags: RecordFlags,
}

impl SignatureRecord {
    /// The initial state of every record: zero signature, no flags.
    pub const ZEROED: Self = Self {
        signature: Signature::ZERO,
        flags: RecordFlags::empty(),
    };

    /// Returns `true` if this record holds a mismatched signature.
    pub const fn is_mismatch(&self) -> bool {
        self.flags.contains(RecordFlags::MISMATCH)
    }

    /// Returns `true` if this record has been written since initialization.
    pub const fn is_valid(&self) -> bool {
        self.flags.contains(RecordFlags::VALID)
    }
}

/// Snapshot of one failed routine: its index and the signature it produced.
///
/// Produced on demand by the store's failure queries; not a live reference
/// into the record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedTest {
    /// Index of the failed routine within its space.
    pub index: usize,
    /// The mismatched signature the routine produced.
    pub signature: Signature,
}
