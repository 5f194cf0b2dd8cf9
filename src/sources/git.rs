//! Git source - shallow fetch of a pinned dependency revision.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::spec::DependencySpec;
use crate::errors::VendorError;
use crate::util::process::{find_executable, ProcessBuilder};

/// Result of a fetch: where the tree landed and which revision it is.
#[derive(Debug, Clone)]
pub struct FetchedSource {
    /// Root of the freshly populated source tree.
    pub root: PathBuf,

    /// Revision actually checked out. Differs from the spec's pin only
    /// when the fallback fired.
    pub revision: Option<String>,

    /// Whether the pinned revision was missing upstream and the default
    /// branch was fetched instead.
    pub fell_back: bool,
}

/// Shallow-fetch (depth 1) `spec.revision` into `dest`.
///
/// Exactly one fallback path exists: when the pinned revision does not
/// exist upstream, the default branch is fetched at depth 1, once, with a
/// warning. Every other failure (network, auth, missing repository) is
/// fatal and aborts the orchestration.
pub fn fetch(spec: &DependencySpec, dest: &Path) -> Result<FetchedSource> {
    let git = find_executable("git").context("git is required to vendor the dependency")?;

    tracing::info!(
        "Fetching {}@{} into {}",
        spec.url,
        spec.revision,
        dest.display()
    );

    match clone(&git, spec, dest, Some(&spec.revision)) {
        Ok(()) => Ok(FetchedSource {
            root: dest.to_path_buf(),
            revision: Some(spec.revision.clone()),
            fell_back: false,
        }),
        Err(stderr) => match classify_clone_failure(spec, stderr) {
            VendorError::RevisionNotFound { revision, .. } => {
                tracing::warn!(
                    "Revision `{revision}` not found upstream; falling back to the default branch"
                );

                clone(&git, spec, dest, None).map_err(|stderr| VendorError::FetchFailed {
                    url: spec.url.to_string(),
                    output: stderr,
                })?;

                Ok(FetchedSource {
                    root: dest.to_path_buf(),
                    revision: None,
                    fell_back: true,
                })
            }
            fatal => Err(fatal.into()),
        },
    }
}

/// Separate the one recoverable clone failure (revision missing upstream)
/// from everything fatal.
fn classify_clone_failure(spec: &DependencySpec, stderr: String) -> VendorError {
    if is_revision_not_found(&stderr) {
        VendorError::RevisionNotFound {
            url: spec.url.to_string(),
            revision: spec.revision.clone(),
        }
    } else {
        VendorError::FetchFailed {
            url: spec.url.to_string(),
            output: stderr,
        }
    }
}

/// One depth-1 clone. Returns the subprocess stderr on failure so the
/// caller can classify it.
///
/// git localizes its messages; the C locale is forced so the stderr
/// signature the classifier matches on is stable.
fn clone(
    git: &Path,
    spec: &DependencySpec,
    dest: &Path,
    revision: Option<&str>,
) -> std::result::Result<(), String> {
    let mut cmd = ProcessBuilder::new(git)
        .env("LC_ALL", "C")
        .env("LANG", "C")
        .args(["clone", "--depth", "1"]);
    if let Some(revision) = revision {
        cmd = cmd.args(["--branch", revision]);
    }
    cmd = cmd.arg(spec.url.as_str()).arg(dest);

    tracing::debug!("Running: {}", cmd.display_command());

    let output = cmd
        .exec()
        .map_err(|e| format!("failed to run git: {e:#}"))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

/// Classify git clone stderr: does it report the requested branch/tag as
/// missing upstream, as opposed to a generic fetch failure?
fn is_revision_not_found(stderr: &str) -> bool {
    let stderr = stderr.to_lowercase();
    stderr.contains("not found in upstream") || stderr.contains("could not find remote branch")
}
