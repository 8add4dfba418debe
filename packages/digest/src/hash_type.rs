//! Algorithm tags

use crate::error::DigestError;
use crate::host::Nid;
use std::fmt;
use std::str::FromStr;

/// Hash algorithm a generic hash state represents
///
/// `None` is the zero value: a state that was allocated but never
/// initialized carries it, and the library rejects it for every call
/// except free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashType {
    /// No algorithm selected
    #[default]
    None,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// SHA3-224
    Sha3_224,
    /// SHA3-256
    Sha3_256,
    /// SHA3-384
    Sha3_384,
    /// SHA3-512
    Sha3_512,
}

impl HashType {
    /// Every real algorithm, in registration order
    pub const ALL: [Self; 7] = [
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
    ];

    /// Digest length in bytes, zero for `None`
    #[must_use]
    pub const fn digest_size(self) -> usize {
        match self {
            Self::None => 0,
            Self::Sha3_224 => 28,
            Self::Sha256 | Self::Sha3_256 => 32,
            Self::Sha384 | Self::Sha3_384 => 48,
            Self::Sha512 | Self::Sha3_512 => 64,
        }
    }

    /// Host object identifier for this algorithm
    #[must_use]
    pub const fn nid(self) -> Nid {
        match self {
            Self::None => Nid::UNDEF,
            Self::Sha256 => Nid::SHA256,
            Self::Sha384 => Nid::SHA384,
            Self::Sha512 => Nid::SHA512,
            Self::Sha3_224 => Nid::SHA3_224,
            Self::Sha3_256 => Nid::SHA3_256,
            Self::Sha3_384 => Nid::SHA3_384,
            Self::Sha3_512 => Nid::SHA3_512,
        }
    }

    /// Host short name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "UNDEF",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha3_224 => "SHA3-224",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
        }
    }

    /// Look up a real algorithm by host object identifier
    #[must_use]
    pub fn from_nid(nid: Nid) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.nid() == nid)
    }

    /// Look up a real algorithm by name
    ///
    /// Accepts the host short names plus the dashed SHA-2 spellings,
    /// ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|ty| {
            ty.name() == wanted || ty.name().replacen("SHA", "SHA-", 1) == wanted
        })
    }

    /// Position in [`HashType::ALL`], `None` for the zero tag
    #[must_use]
    pub(crate) fn slot(self) -> Option<usize> {
        Self::ALL.iter().position(|ty| *ty == self)
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashType {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DigestError::UnsupportedAlgorithm(s.to_string()))
    }
}
