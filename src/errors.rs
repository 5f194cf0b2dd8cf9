//! Error taxonomy for the vendoring engine.
//!
//! Every failure mode the orchestration can hit is a variant here, with a
//! diagnostic code and a suggested fix. Ordinary "package not found" from
//! the probe is not an error - it is the branch that triggers vendoring.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Fatal (and one recoverable) failure modes of the vendoring engine.
#[derive(Debug, Error, Diagnostic)]
pub enum VendorError {
    /// The pkg-config tool itself cannot be found or executed. Distinct
    /// from a missing package, which is a normal outcome.
    #[error("pkg-config is not available")]
    #[diagnostic(
        code(stevedore::probe::tool_missing),
        help("Install pkg-config (or pkgconf) and ensure it is on PATH")
    )]
    ProbeToolMissing {
        #[source]
        source: which::Error,
    },

    /// pkg-config has no record for the package when flags were requested.
    #[error("pkg-config has no record for `{name}`")]
    #[diagnostic(code(stevedore::probe::no_record))]
    ProbeFailed { name: String, output: String },

    /// The pinned revision does not exist upstream. Recovered by falling
    /// back to the default branch; surfaces only if classification is
    /// needed by a caller.
    #[error("revision `{revision}` not found upstream at {url}")]
    #[diagnostic(
        code(stevedore::fetch::revision_not_found),
        help("Check the pinned revision against the upstream repository's tags and branches")
    )]
    RevisionNotFound { url: String, revision: String },

    /// Any fetch failure other than revision-not-found.
    #[error("failed to fetch {url}")]
    #[diagnostic(
        code(stevedore::fetch::failed),
        help("Check your network connection and that the repository URL is correct")
    )]
    FetchFailed { url: String, output: String },

    /// No recognized build-system marker at the root of the fetched tree.
    #[error("no supported build system detected in {root}")]
    #[diagnostic(
        code(stevedore::detect::unknown_build_system),
        help("Expected meson.build, CMakeLists.txt, configure/configure.ac, or a Makefile at the tree root")
    )]
    UnknownBuildSystem { root: PathBuf },

    /// The configure phase of a build driver returned non-zero.
    #[error("configure failed: `{command}`")]
    #[diagnostic(code(stevedore::build::configure_failed))]
    ConfigureFailed { command: String, output: String },

    /// The compile phase of a build driver returned non-zero.
    #[error("compile failed: `{command}`")]
    #[diagnostic(code(stevedore::build::compile_failed))]
    CompileFailed { command: String, output: String },

    /// The install phase of a build driver returned non-zero.
    #[error("install failed: `{command}`")]
    #[diagnostic(code(stevedore::build::install_failed))]
    InstallFailed { command: String, output: String },

    /// A driver reported success but the staged prefix has no pkg-config
    /// metadata for the dependency.
    #[error("no pkg-config metadata for `{name}` under staged prefix {prefix}")]
    #[diagnostic(
        code(stevedore::reconcile::failed),
        help("The build installed into an unexpected layout; inspect the staging directory")
    )]
    ReconcileFailed { name: String, prefix: PathBuf },
}

impl VendorError {
    /// Subprocess output attached to this error, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            VendorError::ProbeFailed { output, .. }
            | VendorError::FetchFailed { output, .. }
            | VendorError::ConfigureFailed { output, .. }
            | VendorError::CompileFailed { output, .. }
            | VendorError::InstallFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}
