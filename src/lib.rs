//! Stevedore - stages a missing native dependency before a build runs
//!
//! This crate provides the core library functionality for Stevedore:
//! probing pkg-config for a native dependency, vendoring its source at a
//! pinned revision when the probe misses, driving whichever build system
//! the source tree uses into a private staging prefix, and reconciling a
//! consuming target's compile/link flags against wherever the dependency
//! ended up.

pub mod builder;
pub mod core;
pub mod errors;
pub mod ops;
pub mod probe;
pub mod sources;
pub mod util;

pub use crate::core::{
    flags::CompileFlags, spec::DependencySpec, spec::Manifest, staging::StagingLayout,
    target::ConsumingTarget,
};

pub use builder::BuildSystemKind;
pub use errors::VendorError;
pub use ops::ensure::{ensure, EnsureOptions, Resolution};
pub use probe::{PkgConfig, ProbeContext};
