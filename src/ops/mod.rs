//! High-level operations: the orchestration state machine and the flag
//! reconciler.

pub mod ensure;
pub mod reconcile;
