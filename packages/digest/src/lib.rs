//! Message-digest adapter between a host method table and a hashing library
//!
//! Each supported algorithm is exposed to the host as a method record with
//! four lifecycle hooks (init, update, final, cleanup), a digest length and a
//! private-state declaration. The hooks are generic over the hashing library
//! and dispatch on an algorithm tag stored in the private state; only the
//! initializer differs per algorithm.
//!
//! ```
//! use hashbridge_digest::{init_digests, DefaultHost, EngineConfig, Nid, Registry};
//!
//! let registry = Registry::new();
//! let report = init_digests(&DefaultHost, &registry, &EngineConfig::default());
//! assert!(report.is_complete());
//!
//! let digest = registry.digest(Nid::SHA256, b"abc").unwrap();
//! assert_eq!(digest.len(), 32);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod hash_type;
pub mod host;
#[cfg(feature = "sha256-direct")]
pub mod legacy;
pub mod library;
pub mod method;
pub mod registry;
pub mod state;
pub mod status;

// Re-export error types
pub use error::{DigestError, Result};

pub use config::EngineConfig;
pub use engine::{
    init_digests, init_global, init_sha256_meth, init_sha384_meth, init_sha3_224_meth,
    init_sha3_256_meth, init_sha3_384_meth, init_sha3_512_meth, init_sha512_meth,
    RegistrationReport, ALGORITHMS,
};
pub use hash_type::HashType;
pub use host::{DefaultHost, MdCtx, MdMethod, MethodHost, Nid, PkeyType, MAX_MD_SIZE};
pub use library::{DirectSha256, HashLibrary, RustCryptoLibrary};
pub use method::{build_descriptor, BuildStep, DescriptorSpec, DigestOps};
pub use registry::Registry;
pub use state::{Algorithm, HashState};
pub use status::{HostStatus, LibStatus};
