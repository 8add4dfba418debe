//! Status conventions on both sides of the adapter
//!
//! The hashing library reports `0` for success and a negative code for
//! failure. The host framework expects `1` for success and `0` for failure.
//! Each convention has its own type so the two never mix, and each has a
//! single translation point into or out of [`crate::Result`].

use crate::error::{DigestError, Result};
use hashbridge_common::LoggingTransformer;

/// Status code returned by a hashing-library entry point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LibStatus(pub i32);

impl LibStatus {
    /// The call succeeded
    pub const OK: Self = Self(0);
    /// Out of memory
    pub const MEMORY_E: Self = Self(-125);
    /// Output buffer too small
    pub const BUFFER_E: Self = Self(-132);
    /// Invalid argument, including an unknown or mismatched algorithm tag
    pub const BAD_FUNC_ARG: Self = Self(-173);

    /// Whether the library reported success
    #[must_use]
    pub fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Raw status value
    #[must_use]
    pub fn code(self) -> i32 {
        self.0
    }

    /// Translate into a `Result`, logging which library call failed
    pub fn check(self, call: &'static str) -> Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            LoggingTransformer::log_library_failure(call, self.0);
            Err(DigestError::Library {
                call,
                status: self.0,
            })
        }
    }
}

/// Boolean-style status handed back to the host framework
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum HostStatus {
    /// Operation failed
    Failure = 0,
    /// Operation succeeded
    Success = 1,
}

impl HostStatus {
    /// Collapse an adapter result into the host convention
    #[must_use]
    pub fn from_result<T>(result: Result<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(_) => Self::Failure,
        }
    }

    /// Whether this status reports success
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// Integer value as seen by the host (`1` or `0`)
    #[must_use]
    pub fn as_int(self) -> i32 {
        self as i32
    }

    /// Map host failure onto a typed error naming the operation
    pub fn into_result(self, operation: &'static str) -> Result<()> {
        match self {
            Self::Success => Ok(()),
            Self::Failure => Err(DigestError::OperationFailed(operation)),
        }
    }
}

impl From<bool> for HostStatus {
    fn from(ok: bool) -> Self {
        if ok {
            Self::Success
        } else {
            Self::Failure
        }
    }
}
