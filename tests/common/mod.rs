//! Shared test utilities: a fake target executable.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A temp directory holding an executable shell script that stands in for
/// the original DISM binary.
pub struct FakeTarget {
    _dir: TempDir,
    path: PathBuf,
}

impl FakeTarget {
    /// Create a fake target running `body` under `/bin/sh`.
    ///
    /// Arguments received are available as `"$@"` inside `body`.
    #[cfg(unix)]
    pub fn new(body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("dism-origin");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write fake target");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake target executable");
        Self { _dir: dir, path }
    }

    /// Fake target that prints each received argument on its own line,
    /// prefixed with `ARG:`, then exits with `code`.
    #[cfg(unix)]
    pub fn echo_args(code: i32) -> Self {
        Self::new(&format!(
            "for a in \"$@\"; do printf 'ARG:%s\\n' \"$a\"; done\nexit {code}"
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the wrapper binary with this fake as its target.
    pub fn run_wrapper(&self, args: &[&str]) -> Output {
        wrapper_cmd()
            .env("DISM_WRAPPER_TARGET", &self.path)
            .args(args)
            .output()
            .expect("Failed to execute wrapper")
    }
}

pub fn wrapper_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dism-wrapper"));
    cmd.env_remove("DISM_WRAPPER_LOG");
    cmd
}

/// Lines the fake target echoed back, in order.
pub fn echoed_args(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|l| l.strip_prefix("ARG:"))
        .map(str::to_string)
        .collect()
}
