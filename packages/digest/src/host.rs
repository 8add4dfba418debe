//! Host framework registration contract
//!
//! The host owns method tables and per-operation contexts. This module
//! captures what the adapter relies on: a descriptor record filled in
//! through fallible setters ([`MethodHost`]), and a context ([`MdCtx`]) that
//! allocates private state from the descriptor's declaration and invokes the
//! four lifecycle hooks.

use crate::error::{DigestError, Result};
use crate::status::HostStatus;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Largest digest the host will carry
pub const MAX_MD_SIZE: usize = 64;

/// Descriptor flag: the digest is usable in signatures with the required key types
pub const MD_FLAG_PKEY_METHOD_SIGNATURE: u32 = 0x0004;

/// Host object identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nid(pub i32);

impl Nid {
    /// Undefined object
    pub const UNDEF: Self = Self(0);
    /// SHA-256
    pub const SHA256: Self = Self(672);
    /// SHA-384
    pub const SHA384: Self = Self(673);
    /// SHA-512
    pub const SHA512: Self = Self(674);
    /// SHA3-224
    pub const SHA3_224: Self = Self(1096);
    /// SHA3-256
    pub const SHA3_256: Self = Self(1097);
    /// SHA3-384
    pub const SHA3_384: Self = Self(1098);
    /// SHA3-512
    pub const SHA3_512: Self = Self(1099);
}

impl fmt::Display for Nid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key type a digest method is bound to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PkeyType {
    /// Not bound to any signature key type
    #[default]
    None,
    /// Bound to the key type with this identifier
    Bound(Nid),
}

/// Initialize hook
pub type InitFn = fn(&mut MdCtx) -> HostStatus;
/// Update hook
pub type UpdateFn = fn(&mut MdCtx, &[u8]) -> HostStatus;
/// Final hook; writes `result_size` bytes to the front of the buffer
pub type FinalFn = fn(&mut MdCtx, &mut [u8]) -> HostStatus;
/// Cleanup hook
pub type CleanupFn = fn(&mut MdCtx) -> HostStatus;

/// Private-state declaration: its size and how to allocate it zeroed
#[derive(Clone, Copy)]
pub struct AppData {
    size: usize,
    alloc: fn() -> Box<dyn Any + Send>,
}

impl AppData {
    /// Declare `T` as the private state; the host allocates it with `T::default()`
    #[must_use]
    pub fn of<T: Default + Send + 'static>() -> Self {
        fn alloc<T: Default + Send + 'static>() -> Box<dyn Any + Send> {
            Box::new(T::default())
        }
        Self {
            size: std::mem::size_of::<T>(),
            alloc: alloc::<T>,
        }
    }

    /// Bytes the host must reserve
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn allocate(&self) -> Box<dyn Any + Send> {
        (self.alloc)()
    }
}

impl fmt::Debug for AppData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppData").field("size", &self.size).finish()
    }
}

/// Digest method table record
#[derive(Debug)]
pub struct MdMethod {
    nid: Nid,
    pkey_type: PkeyType,
    init: Option<InitFn>,
    update: Option<UpdateFn>,
    final_: Option<FinalFn>,
    cleanup: Option<CleanupFn>,
    result_size: usize,
    app_data: Option<AppData>,
    required_pkey_types: Vec<Nid>,
    flags: u32,
}

impl MdMethod {
    /// An empty record for `nid`
    #[must_use]
    pub fn new(nid: Nid, pkey_type: PkeyType) -> Self {
        Self {
            nid,
            pkey_type,
            init: None,
            update: None,
            final_: None,
            cleanup: None,
            result_size: 0,
            app_data: None,
            required_pkey_types: Vec::new(),
            flags: 0,
        }
    }

    /// Algorithm identifier
    #[must_use]
    pub fn nid(&self) -> Nid {
        self.nid
    }

    /// Associated key type
    #[must_use]
    pub fn pkey_type(&self) -> PkeyType {
        self.pkey_type
    }

    /// Digest length in bytes
    #[must_use]
    pub fn result_size(&self) -> usize {
        self.result_size
    }

    /// Private-state size in bytes, zero when undeclared
    #[must_use]
    pub fn app_datasize(&self) -> usize {
        self.app_data.map_or(0, |data| data.size())
    }

    /// Key types this digest may sign with
    #[must_use]
    pub fn required_pkey_types(&self) -> &[Nid] {
        &self.required_pkey_types
    }

    /// Method flags
    #[must_use]
    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// Initialize hook
    #[must_use]
    pub fn init_fn(&self) -> Option<InitFn> {
        self.init
    }

    /// Update hook
    #[must_use]
    pub fn update_fn(&self) -> Option<UpdateFn> {
        self.update
    }

    /// Final hook
    #[must_use]
    pub fn final_fn(&self) -> Option<FinalFn> {
        self.final_
    }

    /// Cleanup hook
    #[must_use]
    pub fn cleanup_fn(&self) -> Option<CleanupFn> {
        self.cleanup
    }

    /// Whether all four hooks, the result size and the private state are set
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.init.is_some()
            && self.update.is_some()
            && self.final_.is_some()
            && self.cleanup.is_some()
            && self.result_size > 0
            && self.app_data.is_some()
    }
}

/// Method-table operations the host exposes to providers
///
/// Every setter may refuse; the provided implementations apply the host's
/// own constraints.
pub trait MethodHost {
    /// Allocate an empty method record
    fn meth_new(&self, nid: Nid, pkey_type: PkeyType) -> Option<MdMethod> {
        Some(MdMethod::new(nid, pkey_type))
    }

    /// Set the initialize hook
    fn set_init(&self, md: &mut MdMethod, init: InitFn) -> HostStatus {
        md.init = Some(init);
        HostStatus::Success
    }

    /// Set the update hook
    fn set_update(&self, md: &mut MdMethod, update: UpdateFn) -> HostStatus {
        md.update = Some(update);
        HostStatus::Success
    }

    /// Set the final hook
    fn set_final(&self, md: &mut MdMethod, final_: FinalFn) -> HostStatus {
        md.final_ = Some(final_);
        HostStatus::Success
    }

    /// Set the cleanup hook
    fn set_cleanup(&self, md: &mut MdMethod, cleanup: CleanupFn) -> HostStatus {
        md.cleanup = Some(cleanup);
        HostStatus::Success
    }

    /// Set the digest length; must be in `1..=MAX_MD_SIZE`
    fn set_result_size(&self, md: &mut MdMethod, size: usize) -> HostStatus {
        if size == 0 || size > MAX_MD_SIZE {
            return HostStatus::Failure;
        }
        md.result_size = size;
        HostStatus::Success
    }

    /// Declare the private state; its size must be non-zero
    fn set_app_datasize(&self, md: &mut MdMethod, data: AppData) -> HostStatus {
        if data.size() == 0 {
            return HostStatus::Failure;
        }
        md.app_data = Some(data);
        HostStatus::Success
    }

    /// Record the key types this digest signs with and flag it for signatures
    fn set_required_pkey_types(&self, md: &mut MdMethod, nids: &[Nid]) -> HostStatus {
        md.required_pkey_types = nids.to_vec();
        md.flags |= MD_FLAG_PKEY_METHOD_SIGNATURE;
        HostStatus::Success
    }

    /// Release a method record that will not be published
    fn meth_free(&self, md: MdMethod) {
        drop(md);
    }
}

/// Host with the stock constraints and nothing else
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHost;

impl MethodHost for DefaultHost {}

/// Per-operation digest context
///
/// Holds the private state the descriptor declared and runs cleanup exactly
/// once, either explicitly or on drop.
pub struct MdCtx {
    md: Arc<MdMethod>,
    md_data: Option<Box<dyn Any + Send>>,
}

impl MdCtx {
    /// A context for `md` with no private state yet
    #[must_use]
    pub fn new(md: Arc<MdMethod>) -> Self {
        Self { md, md_data: None }
    }

    /// The descriptor this context runs
    #[must_use]
    pub fn md(&self) -> &MdMethod {
        &self.md
    }

    /// Typed access to the private state
    pub fn md_data<T: 'static>(&mut self) -> Option<&mut T> {
        self.md_data.as_mut()?.downcast_mut::<T>()
    }

    /// Allocate zeroed private state without running init
    ///
    /// Any previous state is cleaned up first.
    pub fn allocate(&mut self) -> Result<()> {
        self.cleanup();
        let data = self.md.app_data.ok_or(DigestError::MissingState)?;
        self.md_data = Some(data.allocate());
        Ok(())
    }

    /// Allocate fresh private state and run the init hook
    pub fn init(&mut self) -> Result<()> {
        let init = self.md.init.ok_or(DigestError::MissingOperation("init"))?;
        self.allocate()?;
        init(self).into_result("init")
    }

    /// Feed more input
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        let update = self
            .md
            .update
            .ok_or(DigestError::MissingOperation("update"))?;
        update(self, data).into_result("update")
    }

    /// Write the digest into `out` and return its length
    ///
    /// Cleanup is still required afterwards.
    pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<usize> {
        let final_ = self
            .md
            .final_
            .ok_or(DigestError::MissingOperation("final"))?;
        let needed = self.md.result_size;
        if out.len() < needed {
            return Err(DigestError::BufferTooSmall {
                needed,
                actual: out.len(),
            });
        }
        final_(self, out).into_result("final")?;
        Ok(needed)
    }

    /// Finalize into a freshly allocated buffer
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.md.result_size];
        let len = self.finalize_into(&mut out)?;
        out.truncate(len);
        Ok(out)
    }

    /// Run the cleanup hook on allocated state and release it
    ///
    /// Cleanup never fails the caller; a no-op when nothing is allocated.
    pub fn cleanup(&mut self) -> HostStatus {
        if self.md_data.is_none() {
            return HostStatus::Success;
        }
        let cleanup = self.md.cleanup;
        let status = cleanup.map_or(HostStatus::Success, |cleanup| cleanup(self));
        self.md_data = None;
        status
    }

    /// One-shot digest of `data`
    pub fn digest(md: Arc<MdMethod>, data: &[u8]) -> Result<Vec<u8>> {
        let mut ctx = Self::new(md);
        ctx.init()?;
        ctx.update(data)?;
        let out = ctx.finalize();
        ctx.cleanup();
        out
    }
}

impl Drop for MdCtx {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl fmt::Debug for MdCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MdCtx")
            .field("nid", &self.md.nid)
            .field("allocated", &self.md_data.is_some())
            .finish()
    }
}
