//! Command implementations.

pub mod detect;
pub mod ensure;
pub mod flags;
pub mod probe;
