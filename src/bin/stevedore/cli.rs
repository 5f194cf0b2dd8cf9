//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Stevedore - stages a missing native dependency before a build runs
#[derive(Parser)]
#[command(name = "stevedore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Guarantee the dependency is resolvable, vendoring it if needed
    Ensure(EnsureArgs),

    /// Check whether pkg-config already knows the dependency
    Probe(ProbeArgs),

    /// Print the pkg-config-derived compile/link flags for a package
    Flags(FlagsArgs),

    /// Classify the build system of a source tree
    Detect(DetectArgs),
}

#[derive(Args)]
pub struct EnsureArgs {
    /// Path to Stevedore.toml (defaults to the current directory's)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Override the dependency's pkg-config name
    #[arg(long)]
    pub name: Option<String>,

    /// Override the dependency's git URL
    #[arg(long)]
    pub url: Option<String>,

    /// Override the pinned revision (tag or branch)
    #[arg(long)]
    pub rev: Option<String>,

    /// Remove the staging tree when vendoring fails instead of keeping it
    /// for inspection
    #[arg(long)]
    pub discard_staging: bool,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// pkg-config package name
    pub name: String,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// pkg-config package name
    pub name: String,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Source tree root to classify
    pub dir: PathBuf,
}
