//! pkg-config probing.
//!
//! Resolution context is passed explicitly: a [`ProbeContext`] carries the
//! extra metadata search paths (the staged prefix, after a vendored build)
//! and they are handed to pkg-config through the subprocess environment
//! only. The engine's own environment is never mutated, so repeated runs
//! in one process stay re-entrant and cannot accumulate path entries.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::flags::CompileFlags;
use crate::errors::VendorError;
use crate::util::process::{find_pkg_config, ProcessBuilder};

/// Extra pkg-config search paths for one resolution context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeContext {
    search_paths: Vec<PathBuf>,
}

impl ProbeContext {
    /// Context resolving against the system registry only.
    pub fn system() -> Self {
        ProbeContext::default()
    }

    /// Prepend a search path. Duplicate entries are dropped, so pushing
    /// the same staged path twice leaves one entry.
    pub fn push_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.search_paths.contains(&path) {
            self.search_paths.insert(0, path);
        }
    }

    /// The extra search paths, highest priority first.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Compose the `PKG_CONFIG_PATH` value for a probe subprocess:
    /// context paths first, then the caller's prior value. Returns None
    /// when there is nothing to set.
    pub fn env_value(&self, existing: Option<&str>) -> Option<String> {
        let mut parts: Vec<String> = self
            .search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();

        if let Some(existing) = existing {
            if !existing.is_empty() {
                parts.push(existing.to_string());
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(":"))
        }
    }
}

/// Handle on the external pkg-config tool.
#[derive(Debug, Clone)]
pub struct PkgConfig {
    program: PathBuf,
    context: ProbeContext,
}

impl PkgConfig {
    /// Resolve the pkg-config binary for the given context.
    ///
    /// A missing binary is [`VendorError::ProbeToolMissing`] - a hard
    /// tooling failure, unlike a missing package.
    pub fn new(context: ProbeContext) -> Result<Self> {
        let program = find_pkg_config().map_err(|source| VendorError::ProbeToolMissing { source })?;
        Ok(PkgConfig { program, context })
    }

    /// The resolution context this handle probes through.
    pub fn context(&self) -> &ProbeContext {
        &self.context
    }

    fn command(&self) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.program);
        let existing = std::env::var("PKG_CONFIG_PATH").ok();
        if let Some(value) = self.context.env_value(existing.as_deref()) {
            cmd = cmd.env("PKG_CONFIG_PATH", value);
        }
        cmd
    }

    /// Whether the registry has a record for `name`.
    ///
    /// Absence is a normal outcome, not an error; only a malfunctioning
    /// tool propagates as a failure.
    pub fn exists(&self, name: &str) -> Result<bool> {
        let output = self
            .command()
            .args(["--exists", name])
            .exec()
            .with_context(|| format!("failed to run `{}`", self.program.display()))?;
        Ok(output.status.success())
    }

    /// Compiler/linker flags for `name`, parsed from
    /// `pkg-config --cflags --libs` output.
    pub fn flags(&self, name: &str) -> Result<CompileFlags> {
        let cmd = self.command().args(["--cflags", "--libs", name]);
        let output = cmd
            .exec()
            .with_context(|| format!("failed to run `{}`", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(VendorError::ProbeFailed {
                name: name.to_string(),
                output: stderr,
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(CompileFlags::parse(&stdout))
    }

    /// Path of the resolved pkg-config binary.
    pub fn program(&self) -> &Path {
        &self.program
    }
}
