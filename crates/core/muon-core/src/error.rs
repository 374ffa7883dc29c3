//! The error taxonomy shared by every engine operation.

use core::fmt;

/// Errors reported by self-test scheduling and query operations.
///
/// Every fallible operation in the library returns this type; callers are
/// expected to check the result of each call and halt the current sweep on
/// the first error. Nothing retries automatically — re-attempting a cycle
/// on the next tick is a caller-level policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTestError {
    /// The requested feature is disabled by configuration, e.g. no routines
    /// are registered for the requested test space.
    NotImplemented,
    /// A routine index at or beyond the routine count for its space.
    IndexOutOfBounds,
    /// A core id at or beyond the configured core count.
    CpuOutOfBounds,
    /// The custom scheduling policy placeholder was invoked without the
    /// integrator having supplied an implementation.
    CustomSchedulerNotImplemented,
    /// A recorded signature did not match its expected value.
    SignatureMismatch,
}

impl fmt::Display for SelfTestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented => f.write_str("feature not implemented"),
            Self::IndexOutOfBounds => f.write_str("routine index out of bounds"),
            Self::CpuOutOfBounds => f.write_str("cpu core out of bounds"),
            Self::CustomSchedulerNotImplemented => {
                f.write_str("custom scheduler not implemented")
            }
            Self::SignatureMismatch => f.write_str("signature mismatch"),
        }
    }
}

impl core::error::Error for SelfTestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_all_variants() {
        assert_eq!(
            format!("{}", SelfTestError::NotImplemented),
            "feature not implemented"
        );
        assert_eq!(
            format!("{}", SelfTestError::IndexOutOfBounds),
            "routine index out of bounds"
        );
        assert_eq!(
            format!("{}", SelfTestError::CpuOutOfBounds),
            "cpu core out of bounds"
        );
        assert_eq!(
            format!("{}", SelfTestError::CustomSchedulerNotImplemented),
            "custom scheduler not implemented"
        );
        assert_eq!(
            format!("{}", SelfTestError::SignatureMismatch),
            "signature mismatch"
        );
    }

    #[test]
    fn error_equality() {
        assert_eq!(SelfTestError::NotImplemented, SelfTestError::NotImplemented);
        assert_ne!(
            SelfTestError::IndexOutOfBounds,
            SelfTestError::CpuOutOfBounds
        );
    }
}
