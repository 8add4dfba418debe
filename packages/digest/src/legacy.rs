//! Direct SHA-256 path for library builds without the tagged interface
//!
//! The private state is the library's own SHA-256 state, so none of these
//! operations carry or check an algorithm tag. Compiled only with the
//! `sha256-direct` feature, in which case the generic path never registers
//! SHA-256.

use crate::error::{DigestError, Result};
use crate::hash_type::HashType;
use crate::host::{AppData, MdCtx};
use crate::library::DirectSha256;
use crate::method::{DescriptorSpec, DigestOps};
use crate::status::HostStatus;
use hashbridge_common::LoggingTransformer;

fn sha256_state<L: DirectSha256>(ctx: &mut MdCtx) -> Result<&mut L::Sha256> {
    ctx.md_data::<L::Sha256>().ok_or(DigestError::MissingState)
}

/// Initialize a direct SHA-256 state
pub fn sha256_init<L: DirectSha256>(ctx: &mut MdCtx) -> HostStatus {
    tracing::trace!("sha256_init: enter");

    let ret = HostStatus::from_result(
        sha256_state::<L>(ctx).and_then(|sha| L::init_sha256(sha).check("init_sha256")),
    );

    tracing::trace!(ret = ret.as_int(), "sha256_init: leave");
    ret
}

/// Absorb more input
pub fn sha256_update<L: DirectSha256>(ctx: &mut MdCtx, data: &[u8]) -> HostStatus {
    tracing::trace!(len = data.len(), "sha256_update: enter");

    let ret = HostStatus::from_result(sha256_state::<L>(ctx).and_then(|sha| {
        if data.is_empty() {
            return Ok(());
        }
        L::sha256_update(sha, data).check("sha256_update")
    }));

    tracing::trace!(ret = ret.as_int(), "sha256_update: leave");
    ret
}

/// Write the 32-byte digest to the front of `md`
pub fn sha256_final<L: DirectSha256>(ctx: &mut MdCtx, md: &mut [u8]) -> HostStatus {
    tracing::trace!("sha256_final: enter");

    let ret = HostStatus::from_result(sha256_state::<L>(ctx).and_then(|sha| {
        L::sha256_final(sha, md).check("sha256_final")?;
        let size = HashType::Sha256.digest_size().min(md.len());
        LoggingTransformer::log_buffer("SHA-256 Digest", &md[..size]);
        Ok(())
    }));

    tracing::trace!(ret = ret.as_int(), "sha256_final: leave");
    ret
}

/// Release the state; always succeeds
pub fn sha256_cleanup<L: DirectSha256>(ctx: &mut MdCtx) -> HostStatus {
    tracing::trace!("sha256_cleanup: enter");

    if let Some(sha) = ctx.md_data::<L::Sha256>() {
        let status = L::sha256_free(sha);
        if !status.is_ok() {
            LoggingTransformer::log_cleanup_warning("sha256_cleanup", "sha256_free", status.code());
        }
    }

    tracing::trace!(ret = HostStatus::Success.as_int(), "sha256_cleanup: leave");
    HostStatus::Success
}

/// Descriptor recipe for SHA-256 over the direct entry points
#[must_use]
pub fn sha256_spec<L: DirectSha256>() -> DescriptorSpec {
    DescriptorSpec {
        nid: HashType::Sha256.nid(),
        result_size: HashType::Sha256.digest_size(),
        init: sha256_init::<L>,
        ops: DigestOps {
            update: sha256_update::<L>,
            final_: sha256_final::<L>,
            cleanup: sha256_cleanup::<L>,
        },
        app_data: AppData::of::<L::Sha256>(),
    }
}
