//! Hashing-library capability interface
//!
//! The adapter never hashes anything itself. Every byte goes through one of
//! these entry points, which follow the library's status convention
//! ([`LibStatus`], `0` on success).
//!
//! [`RustCryptoLibrary`] binds the interface to the `sha2` and `sha3` crates.

use crate::hash_type::HashType;
use crate::status::LibStatus;
use digest::{Digest, FixedOutputReset};

/// Tagged, algorithm-generic hashing entry points
pub trait HashLibrary: 'static {
    /// Library-owned state for one in-flight hash; `Default` is the zero value
    type HashAlg: Default + Send + 'static;

    /// Prepare `hash` for the algorithm named by `hash_type`
    fn hash_init(hash: &mut Self::HashAlg, hash_type: HashType) -> LibStatus;

    /// Absorb `data`
    fn hash_update(hash: &mut Self::HashAlg, hash_type: HashType, data: &[u8]) -> LibStatus;

    /// Write the digest into the front of `out`
    fn hash_final(hash: &mut Self::HashAlg, hash_type: HashType, out: &mut [u8]) -> LibStatus;

    /// Release anything the state holds
    fn hash_free(hash: &mut Self::HashAlg, hash_type: HashType) -> LibStatus;

    /// Digest length for `hash_type`, `None` if the library does not know it
    fn digest_size(hash_type: HashType) -> Option<usize> {
        match hash_type.digest_size() {
            0 => None,
            size => Some(size),
        }
    }
}

/// Dedicated SHA-256 entry points from library builds that predate the
/// tagged interface
pub trait DirectSha256: 'static {
    /// Library-owned SHA-256 state
    type Sha256: Default + Send + 'static;

    /// Prepare a SHA-256 state
    fn init_sha256(sha: &mut Self::Sha256) -> LibStatus;

    /// Absorb `data`
    fn sha256_update(sha: &mut Self::Sha256, data: &[u8]) -> LibStatus;

    /// Write the 32-byte digest into the front of `out`
    fn sha256_final(sha: &mut Self::Sha256, out: &mut [u8]) -> LibStatus;

    /// Release anything the state holds
    fn sha256_free(sha: &mut Self::Sha256) -> LibStatus;
}

/// Library binding over the RustCrypto `sha2` and `sha3` crates
#[derive(Clone, Copy, Debug, Default)]
pub struct RustCryptoLibrary;

/// Per-algorithm state union of [`RustCryptoLibrary`]
#[derive(Clone, Debug, Default)]
pub enum HashAlg {
    /// Zero value, also the state after free
    #[default]
    Empty,
    /// SHA-256 in progress
    Sha256(sha2::Sha256),
    /// SHA-384 in progress
    Sha384(sha2::Sha384),
    /// SHA-512 in progress
    Sha512(sha2::Sha512),
    /// SHA3-224 in progress
    Sha3_224(sha3::Sha3_224),
    /// SHA3-256 in progress
    Sha3_256(sha3::Sha3_256),
    /// SHA3-384 in progress
    Sha3_384(sha3::Sha3_384),
    /// SHA3-512 in progress
    Sha3_512(sha3::Sha3_512),
}

impl HashAlg {
    fn hash_type(&self) -> HashType {
        match self {
            Self::Empty => HashType::None,
            Self::Sha256(_) => HashType::Sha256,
            Self::Sha384(_) => HashType::Sha384,
            Self::Sha512(_) => HashType::Sha512,
            Self::Sha3_224(_) => HashType::Sha3_224,
            Self::Sha3_256(_) => HashType::Sha3_256,
            Self::Sha3_384(_) => HashType::Sha3_384,
            Self::Sha3_512(_) => HashType::Sha3_512,
        }
    }
}

/// Finalize into `out` and leave the hasher re-initialized
fn finalize_into<D: Digest + FixedOutputReset>(hasher: &mut D, out: &mut [u8]) -> LibStatus {
    let size = <D as Digest>::output_size();
    match out.get_mut(..size) {
        Some(dst) => {
            dst.copy_from_slice(&Digest::finalize_reset(hasher));
            LibStatus::OK
        }
        None => LibStatus::BUFFER_E,
    }
}

impl HashLibrary for RustCryptoLibrary {
    type HashAlg = HashAlg;

    fn hash_init(hash: &mut HashAlg, hash_type: HashType) -> LibStatus {
        *hash = match hash_type {
            HashType::None => return LibStatus::BAD_FUNC_ARG,
            HashType::Sha256 => HashAlg::Sha256(sha2::Sha256::new()),
            HashType::Sha384 => HashAlg::Sha384(sha2::Sha384::new()),
            HashType::Sha512 => HashAlg::Sha512(sha2::Sha512::new()),
            HashType::Sha3_224 => HashAlg::Sha3_224(sha3::Sha3_224::new()),
            HashType::Sha3_256 => HashAlg::Sha3_256(sha3::Sha3_256::new()),
            HashType::Sha3_384 => HashAlg::Sha3_384(sha3::Sha3_384::new()),
            HashType::Sha3_512 => HashAlg::Sha3_512(sha3::Sha3_512::new()),
        };
        LibStatus::OK
    }

    fn hash_update(hash: &mut HashAlg, hash_type: HashType, data: &[u8]) -> LibStatus {
        if hash.hash_type() != hash_type {
            return LibStatus::BAD_FUNC_ARG;
        }
        match hash {
            HashAlg::Empty => return LibStatus::BAD_FUNC_ARG,
            HashAlg::Sha256(h) => Digest::update(h, data),
            HashAlg::Sha384(h) => Digest::update(h, data),
            HashAlg::Sha512(h) => Digest::update(h, data),
            HashAlg::Sha3_224(h) => Digest::update(h, data),
            HashAlg::Sha3_256(h) => Digest::update(h, data),
            HashAlg::Sha3_384(h) => Digest::update(h, data),
            HashAlg::Sha3_512(h) => Digest::update(h, data),
        }
        LibStatus::OK
    }

    fn hash_final(hash: &mut HashAlg, hash_type: HashType, out: &mut [u8]) -> LibStatus {
        if hash.hash_type() != hash_type {
            return LibStatus::BAD_FUNC_ARG;
        }
        match hash {
            HashAlg::Empty => LibStatus::BAD_FUNC_ARG,
            HashAlg::Sha256(h) => finalize_into(h, out),
            HashAlg::Sha384(h) => finalize_into(h, out),
            HashAlg::Sha512(h) => finalize_into(h, out),
            HashAlg::Sha3_224(h) => finalize_into(h, out),
            HashAlg::Sha3_256(h) => finalize_into(h, out),
            HashAlg::Sha3_384(h) => finalize_into(h, out),
            HashAlg::Sha3_512(h) => finalize_into(h, out),
        }
    }

    fn hash_free(hash: &mut HashAlg, _hash_type: HashType) -> LibStatus {
        *hash = HashAlg::Empty;
        LibStatus::OK
    }
}

impl DirectSha256 for RustCryptoLibrary {
    type Sha256 = Option<sha2::Sha256>;

    fn init_sha256(sha: &mut Self::Sha256) -> LibStatus {
        *sha = Some(sha2::Sha256::new());
        LibStatus::OK
    }

    fn sha256_update(sha: &mut Self::Sha256, data: &[u8]) -> LibStatus {
        match sha {
            Some(h) => {
                Digest::update(h, data);
                LibStatus::OK
            }
            None => LibStatus::BAD_FUNC_ARG,
        }
    }

    fn sha256_final(sha: &mut Self::Sha256, out: &mut [u8]) -> LibStatus {
        match sha {
            Some(h) => finalize_into(h, out),
            None => LibStatus::BAD_FUNC_ARG,
        }
    }

    fn sha256_free(sha: &mut Self::Sha256) -> LibStatus {
        *sha = None;
        LibStatus::OK
    }
}
