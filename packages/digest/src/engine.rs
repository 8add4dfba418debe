//! Engine-level digest registration
//!
//! The algorithm table lists what this build provides. Each entry is built
//! and published on its own, so one refused algorithm never keeps the others
//! from registering.

use crate::config::EngineConfig;
use crate::error::{DigestError, Result};
use crate::hash_type::HashType;
use crate::host::{DefaultHost, MdMethod, MethodHost, Nid};
use crate::library::RustCryptoLibrary;
use crate::method::{build_descriptor, DescriptorSpec};
use crate::registry::Registry;
use hashbridge_common::LoggingTransformer;
use std::sync::Arc;

/// One compiled-in algorithm
#[derive(Clone, Copy, Debug)]
pub struct AlgorithmEntry {
    /// Algorithm tag
    pub hash_type: HashType,
    /// Descriptor recipe
    pub spec: fn() -> DescriptorSpec,
}

/// Algorithms this build registers, in order
pub const ALGORITHMS: &[AlgorithmEntry] = &[
    #[cfg(all(feature = "sha256", not(feature = "sha256-direct")))]
    AlgorithmEntry {
        hash_type: HashType::Sha256,
        spec: DescriptorSpec::generic::<RustCryptoLibrary, crate::state::Sha256>,
    },
    #[cfg(feature = "sha256-direct")]
    AlgorithmEntry {
        hash_type: HashType::Sha256,
        spec: crate::legacy::sha256_spec::<RustCryptoLibrary>,
    },
    #[cfg(feature = "sha384")]
    AlgorithmEntry {
        hash_type: HashType::Sha384,
        spec: DescriptorSpec::generic::<RustCryptoLibrary, crate::state::Sha384>,
    },
    #[cfg(feature = "sha512")]
    AlgorithmEntry {
        hash_type: HashType::Sha512,
        spec: DescriptorSpec::generic::<RustCryptoLibrary, crate::state::Sha512>,
    },
    #[cfg(feature = "sha3-224")]
    AlgorithmEntry {
        hash_type: HashType::Sha3_224,
        spec: DescriptorSpec::generic::<RustCryptoLibrary, crate::state::Sha3_224>,
    },
    #[cfg(feature = "sha3-256")]
    AlgorithmEntry {
        hash_type: HashType::Sha3_256,
        spec: DescriptorSpec::generic::<RustCryptoLibrary, crate::state::Sha3_256>,
    },
    #[cfg(feature = "sha3-384")]
    AlgorithmEntry {
        hash_type: HashType::Sha3_384,
        spec: DescriptorSpec::generic::<RustCryptoLibrary, crate::state::Sha3_384>,
    },
    #[cfg(feature = "sha3-512")]
    AlgorithmEntry {
        hash_type: HashType::Sha3_512,
        spec: DescriptorSpec::generic::<RustCryptoLibrary, crate::state::Sha3_512>,
    },
];

/// Table entry for `hash_type`, if compiled in
#[must_use]
pub fn algorithm(hash_type: HashType) -> Option<&'static AlgorithmEntry> {
    ALGORITHMS.iter().find(|entry| entry.hash_type == hash_type)
}

/// Build `entry`'s method and publish it
///
/// # Errors
///
/// Construction or publication failure for this algorithm only.
pub fn register(
    entry: &AlgorithmEntry,
    host: &dyn MethodHost,
    registry: &Registry,
    pkey_nids: &[Nid],
) -> Result<Arc<MdMethod>> {
    let spec = (entry.spec)();
    let md = build_descriptor(host, &spec, pkey_nids)?;
    registry.publish(host, md)
}

fn register_hash_type(
    hash_type: HashType,
    host: &dyn MethodHost,
    registry: &Registry,
) -> Result<Arc<MdMethod>> {
    let entry = algorithm(hash_type)
        .ok_or_else(|| DigestError::UnsupportedAlgorithm(hash_type.name().to_string()))?;
    let result = register(entry, host, registry, &[]);
    LoggingTransformer::log_registration(hash_type.name(), hash_type.nid().0, result.is_ok());
    result
}

macro_rules! meth_initializers {
    ($($(#[$meta:meta])* $name:ident => $hash_type:expr;)*) => {
        $(
            $(#[$meta])*
            ///
            /// # Errors
            ///
            /// Fails if the algorithm is not compiled in, if construction
            /// fails, or if the slot is already published.
            pub fn $name(host: &dyn MethodHost, registry: &Registry) -> Result<Arc<MdMethod>> {
                register_hash_type($hash_type, host, registry)
            }
        )*
    };
}

meth_initializers! {
    /// Build and publish the SHA-256 method
    init_sha256_meth => HashType::Sha256;
    /// Build and publish the SHA-384 method
    init_sha384_meth => HashType::Sha384;
    /// Build and publish the SHA-512 method
    init_sha512_meth => HashType::Sha512;
    /// Build and publish the SHA3-224 method
    init_sha3_224_meth => HashType::Sha3_224;
    /// Build and publish the SHA3-256 method
    init_sha3_256_meth => HashType::Sha3_256;
    /// Build and publish the SHA3-384 method
    init_sha3_384_meth => HashType::Sha3_384;
    /// Build and publish the SHA3-512 method
    init_sha3_512_meth => HashType::Sha3_512;
}

/// Outcome of registering every configured algorithm
#[derive(Debug, Default)]
pub struct RegistrationReport {
    /// Published identifiers
    pub registered: Vec<Nid>,
    /// Algorithms that could not be published, with the reason;
    /// [`HashType::None`] marks a rejected configuration
    pub failed: Vec<(HashType, DigestError)>,
    /// Compiled-in algorithms the configuration left out
    pub skipped: Vec<HashType>,
}

impl RegistrationReport {
    /// Whether every attempted algorithm was published
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Register every compiled-in algorithm the configuration asks for
///
/// An invalid configuration registers nothing and is reported as a single
/// failure tagged [`HashType::None`].
pub fn init_digests(
    host: &dyn MethodHost,
    registry: &Registry,
    config: &EngineConfig,
) -> RegistrationReport {
    if config.debug_log {
        LoggingTransformer::init();
    }
    tracing::trace!("init_digests: enter");

    let mut report = RegistrationReport::default();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "init_digests: rejecting configuration");
        report.failed.push((HashType::None, e));
        return report;
    }

    let pkey_nids = config.pkey_nids();

    for entry in ALGORITHMS {
        let hash_type = entry.hash_type;
        if !config.wants(hash_type) {
            report.skipped.push(hash_type);
            continue;
        }

        let result = register(entry, host, registry, &pkey_nids);
        LoggingTransformer::log_registration(hash_type.name(), hash_type.nid().0, result.is_ok());
        match result {
            Ok(md) => report.registered.push(md.nid()),
            Err(e) => report.failed.push((hash_type, e)),
        }
    }

    tracing::trace!(
        registered = report.registered.len(),
        failed = report.failed.len(),
        "init_digests: leave"
    );
    report
}

/// Register into the process-wide registry through the stock host
pub fn init_global(config: &EngineConfig) -> RegistrationReport {
    init_digests(&DefaultHost, Registry::global(), config)
}
