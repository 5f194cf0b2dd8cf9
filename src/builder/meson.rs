//! Meson build driver.

use std::path::Path;

use anyhow::Result;

use crate::builder::{run_phase, BuildDriver, Phase, INSTALL_PREFIX};
use crate::core::staging::StagingLayout;
use crate::util::process::ProcessBuilder;

/// Drives `meson setup` / `meson compile` / `meson install` with a
/// destination-root override, so the `/usr`-prefixed layout lands under
/// the staging prefix.
pub struct MesonDriver;

fn configure_cmd(build_dir: &Path, src_dir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("meson")
        .arg("setup")
        .arg(build_dir)
        .arg(src_dir)
        .arg("--prefix")
        .arg(INSTALL_PREFIX)
}

fn compile_cmd(build_dir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("meson").arg("compile").arg("-C").arg(build_dir)
}

fn install_cmd(build_dir: &Path, destdir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("meson")
        .arg("install")
        .arg("-C")
        .arg(build_dir)
        .arg("--destdir")
        .arg(destdir)
}

impl BuildDriver for MesonDriver {
    fn name(&self) -> &'static str {
        "meson"
    }

    fn build(&self, layout: &StagingLayout) -> Result<()> {
        tracing::info!("Configuring Meson project");
        run_phase(
            Phase::Configure,
            &configure_cmd(layout.build_dir(), layout.src_dir()),
        )?;

        tracing::info!("Compiling Meson project");
        run_phase(Phase::Compile, &compile_cmd(layout.build_dir()))?;

        tracing::info!("Installing into {}", layout.install_prefix().display());
        run_phase(
            Phase::Install,
            &install_cmd(layout.build_dir(), layout.install_prefix()),
        )?;

        Ok(())
    }
}
