//! Core data model: dependency spec, compile flags, staging layout, and
//! the consuming target.

pub mod flags;
pub mod spec;
pub mod staging;
pub mod target;
