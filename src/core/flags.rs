//! Compile/link flags derived from pkg-config output.

use std::fmt;
use std::path::PathBuf;

/// Include, library-search, and link flags for a consuming target.
///
/// Always rebuilt in full from a fresh probe; never appended to, so a
/// second reconcile pass cannot accumulate stale or duplicate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileFlags {
    /// Include directories (`-I`)
    pub include_dirs: Vec<PathBuf>,

    /// Library search directories (`-L`)
    pub lib_dirs: Vec<PathBuf>,

    /// Library names to link (`-l`)
    pub libs: Vec<String>,
}

impl CompileFlags {
    /// Parse whitespace-separated flag tokens by their two-character
    /// prefix. Tokens with an unrecognized prefix are ignored rather than
    /// rejected, so newer pkg-config output (`-pthread`, `-D...`) passes
    /// through harmlessly.
    pub fn parse(tokens: &str) -> Self {
        let mut flags = CompileFlags::default();

        for token in tokens.split_whitespace() {
            if token.len() < 2 {
                continue;
            }
            let (prefix, rest) = token.split_at(2);
            if rest.is_empty() {
                continue;
            }
            match prefix {
                "-I" => flags.include_dirs.push(PathBuf::from(rest)),
                "-L" => flags.lib_dirs.push(PathBuf::from(rest)),
                "-l" => flags.libs.push(rest.to_string()),
                _ => {}
            }
        }

        flags
    }

    /// Whether no flags of any class were collected.
    pub fn is_empty(&self) -> bool {
        self.include_dirs.is_empty() && self.lib_dirs.is_empty() && self.libs.is_empty()
    }
}

impl fmt::Display for CompileFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for dir in &self.include_dirs {
            parts.push(format!("-I{}", dir.display()));
        }
        for dir in &self.lib_dirs {
            parts.push(format!("-L{}", dir.display()));
        }
        for lib in &self.libs {
            parts.push(format!("-l{}", lib));
        }
        write!(f, "{}", parts.join(" "))
    }
}
