//! Error types for the digest adapter

use crate::host::Nid;
use crate::method::BuildStep;
use thiserror::Error;

/// Digest adapter errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigestError {
    #[error("Hashing library call {call} failed with status {status}")]
    Library { call: &'static str, status: i32 },

    #[error("Digest context has no private state of the expected type")]
    MissingState,

    #[error("Host could not allocate a digest method for nid {nid}")]
    MethodAllocation { nid: Nid },

    #[error("Digest method construction for nid {nid} failed at {step}")]
    MethodStep { nid: Nid, step: BuildStep },

    #[error("Digest method for nid {nid} is already registered")]
    AlreadyRegistered { nid: Nid },

    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Digest operation failed: {0}")]
    OperationFailed(&'static str),

    #[error("Digest method has no {0} operation")]
    MissingOperation(&'static str),

    #[error("Output buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("Invalid engine configuration: {0}")]
    Config(String),
}

/// Result type for digest adapter operations
pub type Result<T> = std::result::Result<T, DigestError>;
