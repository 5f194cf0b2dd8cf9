//! The consuming native extension description.

use std::path::PathBuf;

use crate::core::flags::CompileFlags;
use crate::core::spec::TargetConfig;

/// The native extension the resolved flags apply to. Compiling it is out
/// of scope; this is the hand-off record the (external) compilation step
/// treats as authoritative.
#[derive(Debug, Clone, Default)]
pub struct ConsumingTarget {
    /// Extension name.
    pub name: String,

    /// Source files.
    pub sources: Vec<PathBuf>,

    /// Flags last applied by the reconciler. Fully replaced on every
    /// reconcile pass.
    pub flags: CompileFlags,
}

impl ConsumingTarget {
    /// Create a target with no flags applied yet.
    pub fn new(name: impl Into<String>, sources: Vec<PathBuf>) -> Self {
        ConsumingTarget {
            name: name.into(),
            sources,
            flags: CompileFlags::default(),
        }
    }
}

impl From<TargetConfig> for ConsumingTarget {
    fn from(config: TargetConfig) -> Self {
        ConsumingTarget::new(config.name, config.sources)
    }
}
