//! CMake build driver.

use std::path::Path;

use anyhow::Result;

use crate::builder::{run_phase, BuildDriver, Phase, INSTALL_PREFIX};
use crate::core::staging::StagingLayout;
use crate::util::process::ProcessBuilder;

/// Drives an out-of-tree CMake build. Install uses both an explicit
/// prefix and a `DESTDIR` override so the staged layout mirrors the Meson
/// driver's (`<stage>/usr/...`), keeping pkg-config metadata at the same
/// relative path regardless of which driver ran.
pub struct CMakeDriver;

fn configure_cmd(src_dir: &Path, build_dir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("cmake")
        .arg("-S")
        .arg(src_dir)
        .arg("-B")
        .arg(build_dir)
        .arg(format!("-DCMAKE_INSTALL_PREFIX={INSTALL_PREFIX}"))
}

fn compile_cmd(build_dir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("cmake").arg("--build").arg(build_dir)
}

fn install_cmd(build_dir: &Path, destdir: &Path) -> ProcessBuilder {
    ProcessBuilder::new("cmake")
        .arg("--install")
        .arg(build_dir)
        .arg("--prefix")
        .arg(INSTALL_PREFIX)
        .env("DESTDIR", destdir.display().to_string())
}

impl BuildDriver for CMakeDriver {
    fn name(&self) -> &'static str {
        "cmake"
    }

    fn build(&self, layout: &StagingLayout) -> Result<()> {
        tracing::info!("Configuring CMake project");
        run_phase(
            Phase::Configure,
            &configure_cmd(layout.src_dir(), layout.build_dir()),
        )?;

        tracing::info!("Compiling CMake project");
        run_phase(Phase::Compile, &compile_cmd(layout.build_dir()))?;

        tracing::info!("Installing into {}", layout.install_prefix().display());
        run_phase(
            Phase::Install,
            &install_cmd(layout.build_dir(), layout.install_prefix()),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_shapes() {
        let src = Path::new("/stage/src");
        let build = Path::new("/stage/build");
        let dest = Path::new("/stage/install");

        assert_eq!(
            configure_cmd(src, build).display_command(),
            "cmake -S /stage/src -B /stage/build -DCMAKE_INSTALL_PREFIX=/usr"
        );
        assert_eq!(
            compile_cmd(build).display_command(),
            "cmake --build /stage/build"
        );
        assert_eq!(
            install_cmd(build, dest).display_command(),
            "cmake --install /stage/build --prefix /usr"
        );
    }
}
