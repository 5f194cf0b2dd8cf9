//! Build-system detection from top-level marker files.

use std::path::Path;

use crate::builder::BuildSystemKind;

/// Classify a source tree by the marker files at its root.
///
/// First match wins, in a fixed priority order - real trees sometimes
/// carry leftover markers from a previous build system (a Meson project
/// keeping a legacy Makefile, for instance), and the higher-level system
/// is the one upstream maintains:
///
/// 1. `meson.build`
/// 2. `CMakeLists.txt`
/// 3. `configure` script, or an Autotools template (`configure.ac`,
///    legacy `configure.in`) the driver can regenerate it from
/// 4. a plain `Makefile`/`makefile`
/// 5. otherwise `Unknown`
pub fn detect(root: &Path) -> BuildSystemKind {
    if root.join("meson.build").is_file() {
        BuildSystemKind::Meson
    } else if root.join("CMakeLists.txt").is_file() {
        BuildSystemKind::CMake
    } else if root.join("configure").is_file()
        || root.join("configure.ac").is_file()
        || root.join("configure.in").is_file()
    {
        BuildSystemKind::Autotools
    } else if root.join("Makefile").is_file() || root.join("makefile").is_file() {
        BuildSystemKind::RawMakefile
    } else {
        BuildSystemKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree(markers: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for marker in markers {
            std::fs::write(tmp.path().join(marker), "").unwrap();
        }
        tmp
    }

    #[test]
    fn test_single_markers() {
        assert_eq!(detect(tree(&["meson.build"]).path()), BuildSystemKind::Meson);
        assert_eq!(detect(tree(&["CMakeLists.txt"]).path()), BuildSystemKind::CMake);
        assert_eq!(detect(tree(&["configure"]).path()), BuildSystemKind::Autotools);
        assert_eq!(detect(tree(&["configure.ac"]).path()), BuildSystemKind::Autotools);
        assert_eq!(detect(tree(&["configure.in"]).path()), BuildSystemKind::Autotools);
        assert_eq!(detect(tree(&["Makefile"]).path()), BuildSystemKind::RawMakefile);
        assert_eq!(detect(tree(&["makefile"]).path()), BuildSystemKind::RawMakefile);
    }

    #[test]
    fn test_meson_beats_plain_makefile() {
        let tmp = tree(&["meson.build", "Makefile"]);
        assert_eq!(detect(tmp.path()), BuildSystemKind::Meson);
    }

    #[test]
    fn test_priority_order_holds_with_all_markers() {
        let tmp = tree(&["meson.build", "CMakeLists.txt", "configure", "Makefile"]);
        assert_eq!(detect(tmp.path()), BuildSystemKind::Meson);

        let tmp = tree(&["CMakeLists.txt", "configure", "Makefile"]);
        assert_eq!(detect(tmp.path()), BuildSystemKind::CMake);

        let tmp = tree(&["configure.ac", "Makefile"]);
        assert_eq!(detect(tmp.path()), BuildSystemKind::Autotools);
    }

    #[test]
    fn test_empty_tree_is_unknown() {
        let tmp = tree(&[]);
        assert_eq!(detect(tmp.path()), BuildSystemKind::Unknown);
    }

    #[test]
    fn test_marker_must_be_a_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("meson.build")).unwrap();
        assert_eq!(detect(tmp.path()), BuildSystemKind::Unknown);
    }
}
