//! Flag reconciliation: point the consuming target at wherever the
//! dependency ended up.

use anyhow::Result;

use crate::core::flags::CompileFlags;
use crate::core::target::ConsumingTarget;
use crate::errors::VendorError;
use crate::ops::ensure::Resolution;
use crate::probe::PkgConfig;

/// Re-probe through the resolution's context and replace the target's
/// flags with the result.
///
/// Flags are cleared before reassignment, never appended to, so calling
/// this any number of times yields the same target. A probe miss against
/// a staged resolution is a contract violation between driver and
/// reconciler - the build claimed success but left no usable metadata -
/// and surfaces as [`VendorError::ReconcileFailed`].
pub fn apply(target: &mut ConsumingTarget, name: &str, resolution: &Resolution) -> Result<()> {
    target.flags = CompileFlags::default();

    let probe = PkgConfig::new(resolution.context().clone())?;
    let flags = probe.flags(name).map_err(|e| match resolution {
        Resolution::Staged { root, .. }
            if e.downcast_ref::<VendorError>()
                .is_some_and(|v| matches!(v, VendorError::ProbeFailed { .. })) =>
        {
            VendorError::ReconcileFailed {
                name: name.to_string(),
                prefix: root.clone(),
            }
            .into()
        }
        _ => e,
    })?;

    apply_flags(target, flags);
    Ok(())
}

/// Assign freshly derived flags, discarding any prior values.
pub fn apply_flags(target: &mut ConsumingTarget, flags: CompileFlags) {
    target.flags = flags;
}
