//! Generic hash state and the digest operations shared by every algorithm
//!
//! One [`HashState`] lives in each host context. The initializer stamps the
//! algorithm tag; update, final and cleanup dispatch on that tag into the
//! hashing library and never look at which algorithm they serve.

use crate::error::{DigestError, Result};
use crate::hash_type::HashType;
use crate::host::MdCtx;
use crate::library::HashLibrary;
use crate::status::HostStatus;
use hashbridge_common::LoggingTransformer;
use std::fmt;

/// Private state of one in-flight digest
pub struct HashState<L: HashLibrary> {
    hash: L::HashAlg,
    hash_type: HashType,
}

impl<L: HashLibrary> HashState<L> {
    /// Algorithm this state was initialized for
    #[must_use]
    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    /// Library state, for inspection
    #[must_use]
    pub fn library_state(&self) -> &L::HashAlg {
        &self.hash
    }
}

impl<L: HashLibrary> Default for HashState<L> {
    fn default() -> Self {
        Self {
            hash: L::HashAlg::default(),
            hash_type: HashType::None,
        }
    }
}

impl<L: HashLibrary> fmt::Debug for HashState<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashState")
            .field("hash_type", &self.hash_type)
            .finish_non_exhaustive()
    }
}

/// Compile-time algorithm choice for a per-algorithm initializer
pub trait Algorithm: 'static {
    /// Tag stamped into the state on init
    const HASH_TYPE: HashType;
}

macro_rules! algorithms {
    ($($(#[$meta:meta])* $name:ident => $tag:expr;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $name;

            impl Algorithm for $name {
                const HASH_TYPE: HashType = $tag;
            }
        )*
    };
}

algorithms! {
    /// SHA-256 marker
    Sha256 => HashType::Sha256;
    /// SHA-384 marker
    Sha384 => HashType::Sha384;
    /// SHA-512 marker
    Sha512 => HashType::Sha512;
    /// SHA3-224 marker
    Sha3_224 => HashType::Sha3_224;
    /// SHA3-256 marker
    Sha3_256 => HashType::Sha3_256;
    /// SHA3-384 marker
    Sha3_384 => HashType::Sha3_384;
    /// SHA3-512 marker
    Sha3_512 => HashType::Sha3_512;
}

fn hash_state<L: HashLibrary>(ctx: &mut MdCtx) -> Result<&mut HashState<L>> {
    ctx.md_data::<HashState<L>>().ok_or(DigestError::MissingState)
}

/// Initialize `ctx` for algorithm `A`
///
/// Each `(L, A)` pair is a distinct function, so every descriptor carries its
/// own initializer while sharing this body.
pub fn digest_init<L: HashLibrary, A: Algorithm>(ctx: &mut MdCtx) -> HostStatus {
    let hash_type = A::HASH_TYPE;
    tracing::trace!(%hash_type, "digest_init: enter");

    let result = hash_state::<L>(ctx).and_then(|digest| {
        digest.hash_type = hash_type;
        L::hash_init(&mut digest.hash, digest.hash_type).check("hash_init")
    });
    let ret = HostStatus::from_result(result);

    tracing::trace!(ret = ret.as_int(), "digest_init: leave");
    ret
}

/// Absorb `data` into the state's running hash
pub fn digest_update<L: HashLibrary>(ctx: &mut MdCtx, data: &[u8]) -> HostStatus {
    tracing::trace!(len = data.len(), "digest_update: enter");

    let result = hash_state::<L>(ctx).and_then(|digest| {
        if data.is_empty() {
            return Ok(());
        }
        L::hash_update(&mut digest.hash, digest.hash_type, data).check("hash_update")
    });
    let ret = HostStatus::from_result(result);

    tracing::trace!(ret = ret.as_int(), "digest_update: leave");
    ret
}

/// Write the digest to the front of `md`
///
/// `md` must hold at least the algorithm's output size; the host checks this.
pub fn digest_final<L: HashLibrary>(ctx: &mut MdCtx, md: &mut [u8]) -> HostStatus {
    tracing::trace!("digest_final: enter");

    let result = hash_state::<L>(ctx).and_then(|digest| {
        L::hash_final(&mut digest.hash, digest.hash_type, md).check("hash_final")?;
        let size = L::digest_size(digest.hash_type).unwrap_or(md.len()).min(md.len());
        LoggingTransformer::log_buffer("Message Digest", &md[..size]);
        Ok(())
    });
    let ret = HostStatus::from_result(result);

    tracing::trace!(ret = ret.as_int(), "digest_final: leave");
    ret
}

/// Release library resources held by the state
///
/// Always reports success: a state that was never allocated or never
/// initialized is fine, and a failing free is logged, not returned.
pub fn digest_cleanup<L: HashLibrary>(ctx: &mut MdCtx) -> HostStatus {
    tracing::trace!("digest_cleanup: enter");

    if let Some(digest) = ctx.md_data::<HashState<L>>() {
        release(digest);
    }

    tracing::trace!(ret = HostStatus::Success.as_int(), "digest_cleanup: leave");
    HostStatus::Success
}

#[cfg(not(feature = "skip-hash-free"))]
fn release<L: HashLibrary>(digest: &mut HashState<L>) {
    let status = L::hash_free(&mut digest.hash, digest.hash_type);
    if !status.is_ok() {
        LoggingTransformer::log_cleanup_warning("digest_cleanup", "hash_free", status.code());
    }
}

#[cfg(feature = "skip-hash-free")]
fn release<L: HashLibrary>(_digest: &mut HashState<L>) {}
