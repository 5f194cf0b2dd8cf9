//! Build-system classification and the per-system build drivers.
//!
//! A fetched source tree is classified once into a [`BuildSystemKind`]
//! and dispatched to exactly one [`BuildDriver`]. Every driver runs the
//! same three logical phases - configure, compile, install - into the
//! staging layout's install prefix, reproducing a `/usr`-prefixed layout
//! underneath it so the reconciler can find pkg-config metadata at a
//! predictable relative path regardless of which driver ran.

pub mod autotools;
pub mod cmake;
pub mod detect;
pub mod makefile;
pub mod meson;

use std::fmt;

use anyhow::Result;

use crate::core::staging::StagingLayout;
use crate::errors::VendorError;
use crate::util::process::ProcessBuilder;

pub use detect::detect;

/// Install prefix every driver configures with. The staged tree ends up
/// as `<install_prefix>/usr/...`, matching what a system install of the
/// dependency would look like.
pub const INSTALL_PREFIX: &str = "/usr";

/// Closed classification of the build systems a fetched tree may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSystemKind {
    Meson,
    CMake,
    Autotools,
    RawMakefile,
    Unknown,
}

impl fmt::Display for BuildSystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildSystemKind::Meson => "meson",
            BuildSystemKind::CMake => "cmake",
            BuildSystemKind::Autotools => "autotools",
            BuildSystemKind::RawMakefile => "makefile",
            BuildSystemKind::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// One build-system strategy: configure, compile, and install a fetched
/// source tree into the staging prefix.
pub trait BuildDriver {
    /// Driver name for logs.
    fn name(&self) -> &'static str;

    /// Run configure, compile, and install. On success, pkg-config
    /// metadata for the dependency exists under the staged prefix.
    fn build(&self, layout: &StagingLayout) -> Result<()>;
}

/// Select the driver for a classified tree. `Unknown` has no driver; the
/// orchestrator treats that as fatal.
pub fn driver_for(kind: BuildSystemKind) -> Option<Box<dyn BuildDriver>> {
    match kind {
        BuildSystemKind::Meson => Some(Box::new(meson::MesonDriver)),
        BuildSystemKind::CMake => Some(Box::new(cmake::CMakeDriver)),
        BuildSystemKind::Autotools => Some(Box::new(autotools::AutotoolsDriver)),
        BuildSystemKind::RawMakefile => Some(Box::new(makefile::MakefileDriver)),
        BuildSystemKind::Unknown => None,
    }
}

/// The three logical driver phases, each with its own error variant.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Phase {
    Configure,
    Compile,
    Install,
}

/// Run one phase to completion, mapping both spawn failures and non-zero
/// exits to the phase's error variant with the subprocess output attached
/// for diagnosis. No retries.
pub(crate) fn run_phase(phase: Phase, cmd: &ProcessBuilder) -> Result<()> {
    tracing::debug!("Running: {}", cmd.display_command());

    let output = match cmd.exec() {
        Ok(output) => output,
        Err(e) => return Err(phase_error(phase, cmd, format!("{e:#}")).into()),
    };

    if !output.status.success() {
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(phase_error(phase, cmd, text).into());
    }

    Ok(())
}

fn phase_error(phase: Phase, cmd: &ProcessBuilder, output: String) -> VendorError {
    let command = cmd.display_command();
    match phase {
        Phase::Configure => VendorError::ConfigureFailed { command, output },
        Phase::Compile => VendorError::CompileFailed { command, output },
        Phase::Install => VendorError::InstallFailed { command, output },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_selection() {
        assert_eq!(driver_for(BuildSystemKind::Meson).unwrap().name(), "meson");
        assert_eq!(driver_for(BuildSystemKind::CMake).unwrap().name(), "cmake");
        assert_eq!(
            driver_for(BuildSystemKind::Autotools).unwrap().name(),
            "autotools"
        );
        assert_eq!(
            driver_for(BuildSystemKind::RawMakefile).unwrap().name(),
            "makefile"
        );
        assert!(driver_for(BuildSystemKind::Unknown).is_none());
    }

    #[test]
    fn test_run_phase_maps_nonzero_exit() {
        let cmd = ProcessBuilder::new("false");
        let err = run_phase(Phase::Compile, &cmd).unwrap_err();

        match err.downcast_ref::<VendorError>() {
            Some(VendorError::CompileFailed { command, .. }) => assert_eq!(command, "false"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_run_phase_maps_spawn_failure() {
        let cmd = ProcessBuilder::new("stevedore-no-such-tool");
        let err = run_phase(Phase::Configure, &cmd).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<VendorError>(),
            Some(VendorError::ConfigureFailed { .. })
        ));
    }
}
