//! Target process orchestration.
//!
//! - [`OutputMode::Inherit`]: the child shares our console; we block on exit.
//! - [`OutputMode::Intercept`]: stdout/stderr are piped and drained by
//!   [`drain_intercepted`], stdout relabeled, stderr untouched.
//!
//! Pipes and the child handle are owned values, so every exit path
//! (spawn failure, read failure, normal completion) releases them.

mod command;
mod drain;
mod error;

use std::io::Write;
use std::process::ExitStatus;

pub use command::{target_command, OutputMode};
pub use drain::{drain_intercepted, DrainConfig};
pub use error::{LaunchError, Stream};

use crate::args::CommandLine;
use crate::config::WrapperConfig;

/// Runs the target for one invocation.
pub struct ProcessRunner {
    drain: DrainConfig,
    fallback_exit_code: i32,
}

impl ProcessRunner {
    pub fn new(config: &WrapperConfig) -> Self {
        Self {
            drain: DrainConfig {
                relabel: config.relabel.clone(),
                chunk_size: config.read_chunk_size,
                poll_interval: config.poll_interval,
            },
            fallback_exit_code: config.fallback_exit_code,
        }
    }

    /// Run against the real console streams.
    pub async fn run(&self, command_line: CommandLine, mode: OutputMode) -> Result<i32, LaunchError> {
        self.run_with_sinks(command_line, mode, &mut std::io::stdout(), &mut std::io::stderr())
            .await
    }

    /// Run, writing intercepted output to the given sinks.
    ///
    /// The sinks are unused in [`OutputMode::Inherit`].
    pub async fn run_with_sinks<O, E>(
        &self,
        command_line: CommandLine,
        mode: OutputMode,
        out: &mut O,
        err: &mut E,
    ) -> Result<i32, LaunchError>
    where
        O: Write,
        E: Write,
    {
        let mut child = target_command(&command_line, mode)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: command_line.program().to_string(),
                source,
            })?;
        tracing::info!(pid = child.id(), ?mode, "target started");

        let status = match mode {
            OutputMode::Inherit => child
                .wait()
                .await
                .map_err(|source| LaunchError::Wait { source })?,
            OutputMode::Intercept => drain_intercepted(&mut child, &self.drain, out, err).await?,
        };

        Ok(self.exit_code(status))
    }

    fn exit_code(&self, status: ExitStatus) -> i32 {
        match status.code() {
            Some(code) => {
                tracing::info!(code, "target exited");
                code
            }
            None => {
                tracing::warn!(%status, "target exit code unavailable");
                eprintln!("WARNING: Failed to get process exit code");
                self.fallback_exit_code
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::args::build_passthrough;

    fn line(program: &str, args: &[&str]) -> CommandLine {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        build_passthrough(program, &args, 32767).unwrap()
    }

    #[tokio::test]
    async fn missing_target_is_a_spawn_error() {
        let runner = ProcessRunner::new(&WrapperConfig::default());
        let result = runner
            .run_with_sinks(
                line("/nonexistent/dism-origin.exe", &["/online"]),
                OutputMode::Intercept,
                &mut std::io::sink(),
                &mut std::io::sink(),
            )
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert!(err.os_code().is_some());
    }

    #[tokio::test]
    async fn exit_code_is_returned() {
        let runner = ProcessRunner::new(&WrapperConfig::default());
        let code = runner
            .run_with_sinks(
                line("sh", &["-c", "exit 7"]),
                OutputMode::Inherit,
                &mut std::io::sink(),
                &mut std::io::sink(),
            )
            .await
            .unwrap();
        assert_eq!(code, 7);
    }

    #[tokio::test]
    async fn signal_death_uses_fallback_code() {
        let config = WrapperConfig {
            fallback_exit_code: 42,
            ..WrapperConfig::default()
        };
        let runner = ProcessRunner::new(&config);
        let code = runner
            .run_with_sinks(
                line("sh", &["-c", "kill -9 $$"]),
                OutputMode::Intercept,
                &mut std::io::sink(),
                &mut std::io::sink(),
            )
            .await
            .unwrap();
        assert_eq!(code, 42);
    }

    #[tokio::test]
    async fn intercepted_arguments_survive_quoting() {
        let runner = ProcessRunner::new(&WrapperConfig::default());
        let mut out = Vec::new();
        let code = runner
            .run_with_sinks(
                line("printf", &["%s|", "two words", r#"He said "hi""#]),
                OutputMode::Intercept,
                &mut out,
                &mut std::io::sink(),
            )
            .await
            .unwrap();
        assert_eq!(code, 0);
        assert_eq!(out, br#"two words|He said "hi"|"#);
    }
}
