//! Digest method construction
//!
//! A method record is filled in one step at a time through the host's
//! setters. The first refused step stops construction and the partial record
//! goes back to the host through `meth_free`; only a complete record ever
//! leaves [`build_descriptor`].

use crate::error::{DigestError, Result};
use crate::host::{AppData, CleanupFn, FinalFn, InitFn, MdMethod, MethodHost, Nid, PkeyType, UpdateFn};
use crate::library::HashLibrary;
use crate::state::{self, Algorithm, HashState};
use crate::status::HostStatus;
use std::fmt;

/// Operations shared by every algorithm on one implementation path
#[derive(Clone, Copy, Debug)]
pub struct DigestOps {
    /// Update hook
    pub update: UpdateFn,
    /// Final hook
    pub final_: FinalFn,
    /// Cleanup hook
    pub cleanup: CleanupFn,
}

impl DigestOps {
    /// The tag-dispatching operations over library `L`
    #[must_use]
    pub fn generic<L: HashLibrary>() -> Self {
        Self {
            update: state::digest_update::<L>,
            final_: state::digest_final::<L>,
            cleanup: state::digest_cleanup::<L>,
        }
    }
}

/// Everything needed to build one algorithm's method record
#[derive(Clone, Debug)]
pub struct DescriptorSpec {
    /// Algorithm identifier
    pub nid: Nid,
    /// Digest length in bytes
    pub result_size: usize,
    /// Algorithm-specific initializer
    pub init: InitFn,
    /// Shared operations
    pub ops: DigestOps,
    /// Private-state declaration
    pub app_data: AppData,
}

impl DescriptorSpec {
    /// Recipe for algorithm `A` on the generic path over library `L`
    #[must_use]
    pub fn generic<L: HashLibrary, A: Algorithm>() -> Self {
        Self {
            nid: A::HASH_TYPE.nid(),
            result_size: A::HASH_TYPE.digest_size(),
            init: state::digest_init::<L, A>,
            ops: DigestOps::generic::<L>(),
            app_data: AppData::of::<HashState<L>>(),
        }
    }
}

/// Construction steps, in the order they run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildStep {
    /// Initialize hook
    Init,
    /// Update hook
    Update,
    /// Final hook
    Final,
    /// Cleanup hook
    Cleanup,
    /// Digest length
    ResultSize,
    /// Private-state size
    AppDataSize,
    /// Required key types
    PkeyTypes,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "set_init",
            Self::Update => "set_update",
            Self::Final => "set_final",
            Self::Cleanup => "set_cleanup",
            Self::ResultSize => "set_result_size",
            Self::AppDataSize => "set_app_datasize",
            Self::PkeyTypes => "set_required_pkey_types",
        };
        f.write_str(name)
    }
}

fn step(step: BuildStep, status: HostStatus) -> std::result::Result<(), BuildStep> {
    if status.is_success() {
        Ok(())
    } else {
        Err(step)
    }
}

fn populate(
    host: &dyn MethodHost,
    md: &mut MdMethod,
    spec: &DescriptorSpec,
    pkey_nids: &[Nid],
) -> std::result::Result<(), BuildStep> {
    step(BuildStep::Init, host.set_init(md, spec.init))?;
    step(BuildStep::Update, host.set_update(md, spec.ops.update))?;
    step(BuildStep::Final, host.set_final(md, spec.ops.final_))?;
    step(BuildStep::Cleanup, host.set_cleanup(md, spec.ops.cleanup))?;
    step(BuildStep::ResultSize, host.set_result_size(md, spec.result_size))?;
    step(BuildStep::AppDataSize, host.set_app_datasize(md, spec.app_data))?;
    if !pkey_nids.is_empty() {
        step(BuildStep::PkeyTypes, host.set_required_pkey_types(md, pkey_nids))?;
    }
    Ok(())
}

/// Build a complete method record from `spec`
///
/// `pkey_nids`, when non-empty, marks the digest as usable for signatures
/// with those key types.
///
/// # Errors
///
/// [`DigestError::MethodAllocation`] if the host refuses the record, and
/// [`DigestError::MethodStep`] naming the first refused setter. In the
/// latter case the partial record has already been released.
pub fn build_descriptor(
    host: &dyn MethodHost,
    spec: &DescriptorSpec,
    pkey_nids: &[Nid],
) -> Result<MdMethod> {
    tracing::trace!(nid = spec.nid.0, "build_descriptor: enter");

    let mut md = host
        .meth_new(spec.nid, PkeyType::None)
        .ok_or(DigestError::MethodAllocation { nid: spec.nid })?;

    let result = match populate(host, &mut md, spec, pkey_nids) {
        Ok(()) => Ok(md),
        Err(failed) => {
            tracing::debug!(nid = spec.nid.0, step = %failed, "releasing partial digest method");
            host.meth_free(md);
            Err(DigestError::MethodStep {
                nid: spec.nid,
                step: failed,
            })
        }
    };

    tracing::trace!(ok = result.is_ok(), "build_descriptor: leave");
    result
}
