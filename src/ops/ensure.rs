//! Orchestration: guarantee the dependency is resolvable, vendoring it if
//! the system probe misses.
//!
//! The engine is a straight-line state machine:
//!
//! ```text
//! Probing -> Reconciling                   (system copy present)
//! Probing -> Fetching -> Detecting -> Building -> Reconciling
//! any     -> Failed                        (fatal error, no retry)
//! ```
//!
//! The result is a [`Resolution`] carrying the probe context to resolve
//! flags through - explicit context passing instead of mutating a
//! process-wide `PKG_CONFIG_PATH`, so the engine is re-entrant and a
//! repeated run cannot accumulate search-path entries.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::{detect, driver_for};
use crate::core::spec::DependencySpec;
use crate::core::staging::StagingLayout;
use crate::errors::VendorError;
use crate::probe::{PkgConfig, ProbeContext};
use crate::sources;

/// Orchestration options.
#[derive(Debug, Clone)]
pub struct EnsureOptions {
    /// Keep the staging tree when vendoring fails, for post-mortem
    /// inspection. Successful staging trees are always kept - the
    /// consuming build needs them.
    pub keep_staging_on_failure: bool,
}

impl Default for EnsureOptions {
    fn default() -> Self {
        EnsureOptions {
            keep_staging_on_failure: true,
        }
    }
}

/// Where the dependency ended up, plus the context future probes must
/// resolve through.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Already installed system-wide; vendoring was skipped entirely.
    System { context: ProbeContext },

    /// Freshly built into a staging tree.
    Staged {
        context: ProbeContext,
        /// Staging tree root, persisted past engine exit.
        root: PathBuf,
    },
}

impl Resolution {
    /// Probe context for flag resolution.
    pub fn context(&self) -> &ProbeContext {
        match self {
            Resolution::System { context } | Resolution::Staged { context, .. } => context,
        }
    }

    /// Staging root, when the dependency was vendored.
    pub fn staging_root(&self) -> Option<&Path> {
        match self {
            Resolution::System { .. } => None,
            Resolution::Staged { root, .. } => Some(root),
        }
    }

    /// Whether the dependency was vendored.
    pub fn is_staged(&self) -> bool {
        matches!(self, Resolution::Staged { .. })
    }
}

/// Engine states, logged at each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Probing,
    Fetching,
    Detecting,
    Building,
    Reconciling,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Probing => "probing",
            State::Fetching => "fetching",
            State::Detecting => "detecting",
            State::Building => "building",
            State::Reconciling => "reconciling",
        };
        write!(f, "{name}")
    }
}

fn enter(state: State) {
    tracing::debug!("State: {state}");
}

/// Guarantee `spec` is resolvable via pkg-config, vendoring and staging
/// it when the system probe misses.
pub fn ensure(spec: &DependencySpec, opts: &EnsureOptions) -> Result<Resolution> {
    enter(State::Probing);
    let probe = PkgConfig::new(ProbeContext::system())?;

    if probe.exists(&spec.name)? {
        tracing::info!("{} found via pkg-config; skipping vendoring", spec.name);
        enter(State::Reconciling);
        return Ok(Resolution::System {
            context: ProbeContext::system(),
        });
    }

    tracing::info!(
        "{} not found via pkg-config; vendoring from {}",
        spec.name,
        spec.url
    );

    let layout = StagingLayout::new(&spec.name)?;

    match vendor(spec, &layout) {
        Ok(pc_dir) => {
            let mut context = ProbeContext::system();
            context.push_path(pc_dir);
            let root = layout.persist();
            tracing::info!("Staged {} under {}", spec.name, root.display());

            enter(State::Reconciling);
            Ok(Resolution::Staged { context, root })
        }
        Err(e) => {
            if opts.keep_staging_on_failure {
                let root = layout.persist();
                tracing::warn!("Staging kept for inspection: {}", root.display());
            } else if let Err(cleanup) = layout.discard() {
                tracing::warn!("Failed to remove staging tree: {cleanup:#}");
            }
            Err(e)
        }
    }
}

/// Fetch, classify, and build into the staging layout. Returns the staged
/// pkg-config directory the resolution context must search.
fn vendor(spec: &DependencySpec, layout: &StagingLayout) -> Result<PathBuf> {
    enter(State::Fetching);
    let fetched = sources::fetch(spec, layout.src_dir())?;
    if fetched.fell_back {
        tracing::info!("Building default branch instead of {}", spec.revision);
    }

    enter(State::Detecting);
    let kind = detect(layout.src_dir());
    let driver = driver_for(kind).ok_or_else(|| VendorError::UnknownBuildSystem {
        root: layout.src_dir().to_path_buf(),
    })?;
    tracing::info!("Detected {kind} build system");

    enter(State::Building);
    driver.build(layout)?;

    // Driver contract: metadata exists somewhere under the staged prefix
    layout
        .pkgconfig_dir(&spec.name)
        .ok_or_else(|| {
            VendorError::ReconcileFailed {
                name: spec.name.clone(),
                prefix: layout.install_prefix().to_path_buf(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_accessors() {
        let system = Resolution::System {
            context: ProbeContext::system(),
        };
        assert!(!system.is_staged());
        assert!(system.staging_root().is_none());

        let mut context = ProbeContext::system();
        context.push_path("/stage/usr/lib/pkgconfig");
        let staged = Resolution::Staged {
            context,
            root: PathBuf::from("/stage"),
        };
        assert!(staged.is_staged());
        assert_eq!(staged.staging_root(), Some(Path::new("/stage")));
        assert_eq!(staged.context().search_paths().len(), 1);
    }
}
