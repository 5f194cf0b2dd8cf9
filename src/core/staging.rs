//! Staging layout for vendored builds.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::util::fs::ensure_dir;

/// Private directory tree a vendored build is fetched into, built in, and
/// installed under. One layout per invocation; created lazily, only when
/// the system probe misses.
///
/// Retention: on success the tree is always persisted (the consuming
/// build links against it); on failure the orchestrator decides between
/// persisting for post-mortem and discarding.
#[derive(Debug)]
pub struct StagingLayout {
    root: TempDir,

    /// Where the dependency source is fetched.
    src_dir: PathBuf,

    /// Out-of-tree build directory for drivers that support one.
    build_dir: PathBuf,

    /// Destination-root the install phase populates. Drivers reproduce a
    /// `/usr`-prefixed layout underneath it.
    install_prefix: PathBuf,
}

impl StagingLayout {
    /// Create a fresh unique staging tree named after the dependency.
    pub fn new(name: &str) -> Result<Self> {
        let root = tempfile::Builder::new()
            .prefix(&format!("{name}-"))
            .tempdir()
            .context("failed to create staging directory")?;

        let src_dir = root.path().join("src");
        let build_dir = root.path().join("build");
        let install_prefix = root.path().join("install");

        // src_dir is created by the fetch itself
        ensure_dir(&build_dir)?;
        ensure_dir(&install_prefix)?;

        Ok(StagingLayout {
            root,
            src_dir,
            build_dir,
            install_prefix,
        })
    }

    /// Root of the staging tree.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Fetched source tree root.
    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    /// Out-of-tree build directory.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Install destination-root.
    pub fn install_prefix(&self) -> &Path {
        &self.install_prefix
    }

    /// Locate the staged pkg-config directory containing `<name>.pc`
    /// under the install prefix. Searched rather than assumed, so
    /// `lib64/pkgconfig` and similar layouts also satisfy the driver
    /// contract.
    pub fn pkgconfig_dir(&self, name: &str) -> Option<PathBuf> {
        let pc_file = format!("{name}.pc");
        walkdir::WalkDir::new(&self.install_prefix)
            .into_iter()
            .filter_map(|e| e.ok())
            .find(|e| e.file_type().is_file() && e.file_name().to_string_lossy() == pc_file)
            .and_then(|e| e.path().parent().map(Path::to_path_buf))
    }

    /// Persist the tree past engine exit and return its root.
    pub fn persist(self) -> PathBuf {
        self.root.keep()
    }

    /// Delete the tree now.
    pub fn discard(self) -> Result<()> {
        self.root
            .close()
            .context("failed to remove staging directory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_directories() {
        let layout = StagingLayout::new("libfoo").unwrap();

        assert!(layout.root().is_dir());
        assert!(layout.build_dir().is_dir());
        assert!(layout.install_prefix().is_dir());
        // The fetch populates src itself
        assert!(!layout.src_dir().exists());

        let name = layout.root().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("libfoo-"));
    }

    #[test]
    fn test_pkgconfig_dir_found_under_nested_prefix() {
        let layout = StagingLayout::new("libfoo").unwrap();
        let pc_dir = layout.install_prefix().join("usr/lib/pkgconfig");
        std::fs::create_dir_all(&pc_dir).unwrap();
        std::fs::write(pc_dir.join("libfoo.pc"), "Name: libfoo\n").unwrap();

        assert_eq!(layout.pkgconfig_dir("libfoo"), Some(pc_dir));
        assert_eq!(layout.pkgconfig_dir("libbar"), None);
    }

    #[test]
    fn test_persist_outlives_layout() {
        let layout = StagingLayout::new("libfoo").unwrap();
        let root = layout.persist();

        assert!(root.is_dir());
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_discard_removes_tree() {
        let layout = StagingLayout::new("libfoo").unwrap();
        let root = layout.root().to_path_buf();

        layout.discard().unwrap();
        assert!(!root.exists());
    }
}
