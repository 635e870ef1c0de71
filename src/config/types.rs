use std::time::Duration;

use crate::args::RewriteRules;
use crate::output::OutputRelabel;

/// Root configuration container.
///
/// Everything here is compiled in; `Default` is the production setup and
/// tests substitute their own values.
#[derive(Debug, Clone)]
pub struct WrapperConfig {
    /// File name of the renamed original executable.
    pub target_name: String,
    /// Token tables used by the classifier and assembler.
    pub rules: RewriteRules,
    /// Feature-name relabel applied to intercepted stdout.
    pub relabel: OutputRelabel,
    /// Command-line capacity in UTF-16 units, terminating NUL included.
    pub max_command_line: usize,
    /// Largest chunk read from a child pipe at once.
    pub read_chunk_size: usize,
    /// How long stderr may stay silent after the child exited before the
    /// drain stops waiting for it.
    pub poll_interval: Duration,
    /// Exit code used when the wrapper fails or the child's code is unknown.
    pub fallback_exit_code: i32,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            target_name: "dism-origin.exe".to_string(),
            rules: RewriteRules::default(),
            relabel: OutputRelabel::default(),
            max_command_line: 32767,
            read_chunk_size: 16384,
            poll_interval: Duration::from_millis(100),
            fallback_exit_code: 1,
        }
    }
}
