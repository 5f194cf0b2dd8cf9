//! Dependency specification and the `Stevedore.toml` manifest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default dependency: libgbinder, pinned at the revision the consuming
/// bindings are known to work against.
pub const DEFAULT_NAME: &str = "libgbinder";
pub const DEFAULT_URL: &str = "https://github.com/mer-hybris/libgbinder.git";
pub const DEFAULT_REVISION: &str = "v1.1.42";

/// The one native dependency an invocation guarantees. Immutable once
/// the engine starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Canonical name, used both for pkg-config lookups and for the
    /// `<name>.pc` metadata file a staged build must produce.
    pub name: String,

    /// Upstream source repository.
    pub url: Url,

    /// Pinned tag or branch to fetch.
    pub revision: String,
}

impl Default for DependencySpec {
    fn default() -> Self {
        DependencySpec {
            name: DEFAULT_NAME.to_string(),
            url: Url::parse(DEFAULT_URL).expect("default URL is valid"),
            revision: DEFAULT_REVISION.to_string(),
        }
    }
}

/// Staging retention policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Keep the staging directory when the build fails, for post-mortem
    /// inspection. On success the directory is always kept - the
    /// consuming build compiles and links against it.
    pub keep_on_failure: bool,
}

impl Default for StagingConfig {
    fn default() -> Self {
        StagingConfig {
            keep_on_failure: true,
        }
    }
}

/// `[target]` table: the native extension the resolved flags apply to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Extension name.
    pub name: String,

    /// Source files for the (out-of-scope) compilation step.
    pub sources: Vec<PathBuf>,
}

/// Parsed `Stevedore.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// The dependency to guarantee.
    pub dependency: DependencySpecTable,

    /// Staging retention policy.
    pub staging: StagingConfig,

    /// Consuming target description.
    pub target: Option<TargetConfig>,
}

/// `[dependency]` table with per-field defaults, so a manifest may pin
/// only the revision and inherit the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencySpecTable {
    pub name: String,
    pub url: Url,
    pub revision: String,
}

impl Default for DependencySpecTable {
    fn default() -> Self {
        let spec = DependencySpec::default();
        DependencySpecTable {
            name: spec.name,
            url: spec.url,
            revision: spec.revision,
        }
    }
}

impl From<DependencySpecTable> for DependencySpec {
    fn from(table: DependencySpecTable) -> Self {
        DependencySpec {
            name: table.name,
            url: table.url,
            revision: table.revision,
        }
    }
}

impl Manifest {
    /// Load a manifest from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse manifest text.
    pub fn parse(text: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(text)?;
        Ok(manifest)
    }

    /// The dependency spec this manifest pins.
    pub fn dependency_spec(&self) -> DependencySpec {
        self.dependency.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_is_pinned() {
        let spec = DependencySpec::default();
        assert_eq!(spec.name, "libgbinder");
        assert_eq!(spec.revision, "v1.1.42");
        assert_eq!(spec.url.host_str(), Some("github.com"));
    }

    #[test]
    fn test_parse_full_manifest() {
        let manifest = Manifest::parse(
            r#"
[dependency]
name = "foo"
url = "https://example.com/foo.git"
revision = "v2.0"

[staging]
keep_on_failure = false

[target]
name = "foo_ext"
sources = ["foo_ext.c"]
"#,
        )
        .unwrap();

        let spec = manifest.dependency_spec();
        assert_eq!(spec.name, "foo");
        assert_eq!(spec.revision, "v2.0");
        assert!(!manifest.staging.keep_on_failure);
        let target = manifest.target.unwrap();
        assert_eq!(target.name, "foo_ext");
        assert_eq!(target.sources, vec![PathBuf::from("foo_ext.c")]);
    }

    #[test]
    fn test_parse_partial_manifest_inherits_defaults() {
        let manifest = Manifest::parse(
            r#"
[dependency]
revision = "v1.1.40"
"#,
        )
        .unwrap();

        let spec = manifest.dependency_spec();
        assert_eq!(spec.name, "libgbinder");
        assert_eq!(spec.revision, "v1.1.40");
        assert!(manifest.staging.keep_on_failure);
        assert!(manifest.target.is_none());
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert_eq!(manifest.dependency_spec().name, "libgbinder");
    }
}
