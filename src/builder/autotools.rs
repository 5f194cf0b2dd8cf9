//! Autotools build driver.

use std::path::Path;

use anyhow::Result;

use crate::builder::{run_phase, BuildDriver, Phase, INSTALL_PREFIX};
use crate::core::staging::StagingLayout;
use crate::util::process::ProcessBuilder;

/// Drives a classic in-tree Autotools build: regenerate `configure` from
/// the template if only the template is present, then
/// `./configure --prefix=/usr`, `make`, `make install DESTDIR=<stage>`.
///
/// Every step sets its working directory on the subprocess; the engine's
/// own working directory is never touched, so there is nothing to restore
/// on failure paths.
pub struct AutotoolsDriver;

fn regen_cmd(src_dir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("autoreconf").args(["-f", "-i"]).cwd(src_dir)
}

fn configure_cmd(src_dir: &Path) -> ProcessBuilder {
    ProcessBuilder::new(src_dir.join("configure"))
        .arg(format!("--prefix={INSTALL_PREFIX}"))
        .cwd(src_dir)
}

fn compile_cmd(src_dir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("make").cwd(src_dir)
}

fn install_cmd(src_dir: &Path, destdir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("make")
        .arg("install")
        .arg(format!("DESTDIR={}", destdir.display()))
        .cwd(src_dir)
}

impl BuildDriver for AutotoolsDriver {
    fn name(&self) -> &'static str {
        "autotools"
    }

    fn build(&self, layout: &StagingLayout) -> Result<()> {
        let src = layout.src_dir();

        if !src.join("configure").is_file() {
            // Template-only tree; regeneration failure is fatal
            tracing::info!("Regenerating configure from template");
            run_phase(Phase::Configure, &regen_cmd(src))?;
        }

        tracing::info!("Running configure");
        run_phase(Phase::Configure, &configure_cmd(src))?;

        tracing::info!("Compiling with make");
        run_phase(Phase::Compile, &compile_cmd(src))?;

        tracing::info!("Installing into {}", layout.install_prefix().display());
        run_phase(Phase::Install, &install_cmd(src, layout.install_prefix()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_shapes() {
        let src = Path::new("/stage/src");
        let dest = Path::new("/stage/install");

        assert_eq!(regen_cmd(src).display_command(), "autoreconf -f -i");
        assert_eq!(
            configure_cmd(src).display_command(),
            "/stage/src/configure --prefix=/usr"
        );
        assert_eq!(compile_cmd(src).display_command(), "make");
        assert_eq!(
            install_cmd(src, dest).display_command(),
            "make install DESTDIR=/stage/install"
        );
    }
}
