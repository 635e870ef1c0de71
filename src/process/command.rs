//! Turning a [`CommandLine`] into a spawnable process command.

use std::process::Stdio;

use tokio::process::Command;

use crate::args::CommandLine;

/// Child gets no console window of its own while its output is piped.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// How the child's output streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Child writes straight to our console.
    Inherit,
    /// Child writes into pipes we drain.
    Intercept,
}

/// Build the command for the target.
///
/// On Windows the argument text is handed over verbatim so the target sees
/// exactly the line we assembled. Elsewhere it is split back into arguments
/// with the same rules the target would apply.
pub fn target_command(command_line: &CommandLine, mode: OutputMode) -> Command {
    let mut cmd = std::process::Command::new(command_line.program());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;

        let text = command_line.arguments_text();
        if !text.is_empty() {
            cmd.raw_arg(text);
        }
        if mode == OutputMode::Intercept {
            cmd.creation_flags(CREATE_NO_WINDOW);
        }
    }
    #[cfg(not(windows))]
    {
        cmd.args(command_line.arguments());
    }

    cmd.stdin(Stdio::inherit());
    match mode {
        OutputMode::Inherit => {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        OutputMode::Intercept => {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }
    }

    Command::from(cmd)
}
