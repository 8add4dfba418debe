//! Published digest methods
//!
//! One write-once slot per algorithm. Slots are filled during engine
//! initialization and only read afterwards.

use crate::error::{DigestError, Result};
use crate::hash_type::HashType;
use crate::host::{MdCtx, MdMethod, MethodHost, Nid};
use once_cell::sync::{Lazy, OnceCell};
use std::fmt;
use std::sync::Arc;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// Algorithm identifier to published method
pub struct Registry {
    slots: [OnceCell<Arc<MdMethod>>; HashType::ALL.len()],
}

impl Registry {
    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    /// The process-wide registry
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    fn slot(&self, nid: Nid) -> Option<&OnceCell<Arc<MdMethod>>> {
        HashType::from_nid(nid)
            .and_then(HashType::slot)
            .and_then(|index| self.slots.get(index))
    }

    /// Publish a fully built method into its algorithm's slot
    ///
    /// # Errors
    ///
    /// [`DigestError::AlreadyRegistered`] when the slot is taken, in which case
    /// `md` is released through the host and the published method is left
    /// untouched. [`DigestError::UnsupportedAlgorithm`] when no slot exists
    /// for the method's identifier.
    pub fn publish(&self, host: &dyn MethodHost, md: MdMethod) -> Result<Arc<MdMethod>> {
        let nid = md.nid();
        let Some(slot) = self.slot(nid) else {
            host.meth_free(md);
            return Err(DigestError::UnsupportedAlgorithm(format!("nid {nid}")));
        };

        match slot.set(Arc::new(md)) {
            Ok(()) => slot
                .get()
                .cloned()
                .ok_or(DigestError::UnsupportedAlgorithm(format!("nid {nid}"))),
            Err(rejected) => {
                if let Ok(md) = Arc::try_unwrap(rejected) {
                    host.meth_free(md);
                }
                Err(DigestError::AlreadyRegistered { nid })
            }
        }
    }

    /// Published method for `nid`
    #[must_use]
    pub fn get(&self, nid: Nid) -> Option<Arc<MdMethod>> {
        self.slot(nid).and_then(OnceCell::get).cloned()
    }

    /// Published method for an algorithm name
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<Arc<MdMethod>> {
        HashType::from_name(name).and_then(|ty| self.get(ty.nid()))
    }

    /// Whether `nid` has a published method
    #[must_use]
    pub fn is_registered(&self, nid: Nid) -> bool {
        self.slot(nid).is_some_and(|slot| slot.get().is_some())
    }

    /// Identifiers of every published method, in registration-table order
    #[must_use]
    pub fn nids(&self) -> Vec<Nid> {
        HashType::ALL
            .into_iter()
            .map(HashType::nid)
            .filter(|nid| self.is_registered(*nid))
            .collect()
    }

    /// One-shot digest of `data` with the method published for `nid`
    ///
    /// # Errors
    ///
    /// [`DigestError::UnsupportedAlgorithm`] when nothing is published for
    /// `nid`, otherwise whatever the digest operations report.
    pub fn digest(&self, nid: Nid, data: &[u8]) -> Result<Vec<u8>> {
        let md = self
            .get(nid)
            .ok_or_else(|| DigestError::UnsupportedAlgorithm(format!("nid {nid}")))?;
        MdCtx::digest(md, data)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("nids", &self.nids())
            .finish()
    }
}
