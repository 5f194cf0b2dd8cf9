//! Raw Makefile build driver.

use std::path::Path;

use anyhow::Result;

use crate::builder::{run_phase, BuildDriver, Phase};
use crate::core::staging::StagingLayout;
use crate::util::process::ProcessBuilder;

/// Drives a plain Makefile tree: the default umbrella target is assumed
/// to build everything, including pkg-config metadata. Install runs the
/// `install` target - and `install-dev`, when the Makefile declares one,
/// since trees like libgbinder's split headers and `.pc` files into a
/// separate dev target - with `DESTDIR` set for the install steps only.
pub struct MakefileDriver;

fn compile_cmd(src_dir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("make").cwd(src_dir)
}

fn install_cmd(src_dir: &Path, target: &str, destdir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("make")
        .arg(target)
        .cwd(src_dir)
        .env("DESTDIR", destdir.display().to_string())
}

/// Install-style targets to drive, in order. `install` always; a
/// dev/headers split target only when the Makefile declares it.
fn install_targets(src_dir: &Path) -> Vec<&'static str> {
    let mut targets = vec!["install"];

    let makefile = ["Makefile", "makefile"]
        .iter()
        .map(|m| src_dir.join(m))
        .find(|p| p.is_file());

    if let Some(makefile) = makefile {
        if let Ok(text) = std::fs::read_to_string(makefile) {
            if text.lines().any(|l| l.starts_with("install-dev:")) {
                targets.push("install-dev");
            }
        }
    }

    targets
}

impl BuildDriver for MakefileDriver {
    fn name(&self) -> &'static str {
        "makefile"
    }

    fn build(&self, layout: &StagingLayout) -> Result<()> {
        let src = layout.src_dir();

        // No configure phase; make's default target builds everything
        tracing::info!("Compiling with make");
        run_phase(Phase::Compile, &compile_cmd(src))?;

        tracing::info!("Installing into {}", layout.install_prefix().display());
        for target in install_targets(src) {
            run_phase(
                Phase::Install,
                &install_cmd(src, target, layout.install_prefix()),
            )?;
        }

        Ok(())
    }
}
