//! Source acquisition for vendored dependencies.

pub mod git;

pub use git::{fetch, FetchedSource};
