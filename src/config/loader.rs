use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::types::WrapperConfig;

/// Environment variable overriding the target executable's location.
pub const TARGET_ENV: &str = "DISM_WRAPPER_TARGET";

impl WrapperConfig {
    /// Returns the path of the executable to launch.
    ///
    /// Resolution order:
    /// 1. `DISM_WRAPPER_TARGET`, if set and non-empty;
    /// 2. `target_name` next to the wrapper's own executable, if it exists;
    /// 3. the bare `target_name`, left to the OS search path.
    pub fn resolve_target(&self) -> PathBuf {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        self.resolve_target_from(std::env::var_os(TARGET_ENV), exe_dir.as_deref())
    }

    /// Same as [`resolve_target`](Self::resolve_target) with explicit inputs.
    pub fn resolve_target_from(&self, env_override: Option<OsString>, exe_dir: Option<&Path>) -> PathBuf {
        if let Some(path) = env_override.filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }

        if let Some(dir) = exe_dir {
            let candidate = dir.join(&self.target_name);
            if candidate.is_file() {
                return candidate;
            }
        }

        PathBuf::from(&self.target_name)
    }
}
