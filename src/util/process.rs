//! Subprocess execution utilities.
//!
//! Every external tool the engine drives (pkg-config, git, meson, ninja,
//! cmake, autoreconf, make) goes through [`ProcessBuilder`]. Invocations
//! are synchronous and blocking with no timeout; a hung tool hangs the
//! orchestration.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set an environment variable for this invocation only.
    ///
    /// The engine never mutates its own process environment; variables
    /// like `DESTDIR` and `PKG_CONFIG_PATH` are scoped to the subprocess.
    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.env
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Set the working directory for this invocation only.
    ///
    /// The engine's own working directory is never changed, so there is
    /// nothing to restore on failure paths.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command, wait for completion, and capture output.
    pub fn exec(&self) -> Result<Output> {
        let mut cmd = self.build_command();
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))?;

        Ok(output)
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> std::result::Result<PathBuf, which::Error> {
    which::which(name)
}

/// Find pkg-config, honoring the PKG_CONFIG override convention.
pub fn find_pkg_config() -> std::result::Result<PathBuf, which::Error> {
    if let Ok(tool) = std::env::var("PKG_CONFIG") {
        if let Ok(path) = find_executable(&tool) {
            return Ok(path);
        }
    }

    find_executable("pkg-config").or_else(|_| find_executable("pkgconf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_captures_output() {
        let output = ProcessBuilder::new("echo").arg("hello").exec().unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("hello"));
    }

    #[test]
    fn test_subprocess_env_is_scoped() {
        let before = std::env::var("STEVEDORE_TEST_DESTDIR").ok();

        let output = ProcessBuilder::new("sh")
            .args(["-c", "printf '%s' \"$STEVEDORE_TEST_DESTDIR\""])
            .env("STEVEDORE_TEST_DESTDIR", "/tmp/stage")
            .exec()
            .unwrap();

        assert_eq!(String::from_utf8_lossy(&output.stdout), "/tmp/stage");
        // The calling process never saw the variable
        assert_eq!(std::env::var("STEVEDORE_TEST_DESTDIR").ok(), before);
    }

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("meson").args(["setup", "build", "src"]);

        assert_eq!(pb.display_command(), "meson setup build src");
    }
}
