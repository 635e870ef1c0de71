use std::fmt;
use std::io;

use thiserror::Error;

/// Which of the child's output streams an error concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => write!(f, "stdout"),
            Stream::Stderr => write!(f, "stderr"),
        }
    }
}

/// Errors that prevent the wrapper from running the target to completion.
///
/// A target that runs and exits non-zero is not an error; its code is
/// returned as-is.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Target missing, permission denied, or pipe setup failed.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for target process: {source}")]
    Wait {
        #[source]
        source: io::Error,
    },

    /// Writing child output to our own console failed.
    #[error("failed to forward child {stream}: {source}")]
    Forward {
        stream: Stream,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Platform error code of the underlying failure, if any.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            LaunchError::Spawn { source, .. }
            | LaunchError::Wait { source }
            | LaunchError::Forward { source, .. } => source.raw_os_error(),
        }
    }
}
