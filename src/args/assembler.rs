//! Command-line assembler: one flat, length-checked command string.

use std::borrow::Cow;

use thiserror::Error;

use crate::args::classifier::{classify, ClassifiedArg};
use crate::args::quoting::{quote_argument, split_command_line};
use crate::args::registry::RewriteRules;

/// Errors that can occur while building a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("command line would be {attempted} UTF-16 units, limit is {limit}")]
    TooLong { limit: usize, attempted: usize },
}

/// A finished command line: program followed by quoted arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    line: String,
    program_end: usize,
}

impl CommandLine {
    /// The program, unquoted.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The whole line as handed to the OS.
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Everything after the program, without the separating space.
    pub fn arguments_text(&self) -> &str {
        self.line[self.program_end..].trim_start_matches(' ')
    }

    /// Re-tokenize the argument part using the target's parsing rules.
    pub fn arguments(&self) -> Vec<String> {
        split_command_line(self.arguments_text())
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.line)
    }
}

/// Builder for the command line passed to the target process.
///
/// Every append is checked against the limit; a line that would not fit is
/// never returned in truncated form.
#[derive(Debug, Clone)]
pub struct ArgAssembler {
    program: String,
    line: String,
    program_end: usize,
    /// Length so far in UTF-16 code units.
    units: usize,
    /// Capacity in UTF-16 code units, terminating NUL included.
    limit: usize,
}

impl ArgAssembler {
    /// Start with the (quoted) program name.
    ///
    /// The program is always counted as if wrapped in quotes: the OS-level
    /// command line built at spawn time quotes it unconditionally.
    pub fn new(program: &str, limit: usize) -> Result<Self, BuildError> {
        let mut assembler = Self {
            program: program.to_string(),
            line: String::new(),
            program_end: 0,
            units: 0,
            limit,
        };
        let quoted = quote_argument(program);
        let implicit_quotes = if matches!(quoted, Cow::Borrowed(_)) { 2 } else { 0 };
        assembler.append_counted(&quoted, implicit_quotes)?;
        assembler.program_end = assembler.line.len();
        Ok(assembler)
    }

    /// Append one original argument, quoted if needed.
    pub fn push_quoted(&mut self, arg: &str) -> Result<(), BuildError> {
        self.append(" ")?;
        self.append(&quote_argument(arg))
    }

    /// Append the replacement tokens verbatim, space separated, in order.
    pub fn push_replacement(&mut self, tokens: &[String]) -> Result<(), BuildError> {
        for token in tokens {
            self.append(" ")?;
            self.append(token)?;
        }
        Ok(())
    }

    fn append(&mut self, text: &str) -> Result<(), BuildError> {
        self.append_counted(text, 0)
    }

    /// Append `text`, charging `extra` units that are not part of the text.
    fn append_counted(&mut self, text: &str, extra: usize) -> Result<(), BuildError> {
        let attempted = self.units + text.encode_utf16().count() + extra;
        // One unit stays reserved for the terminating NUL.
        if attempted >= self.limit {
            return Err(BuildError::TooLong {
                limit: self.limit,
                attempted,
            });
        }
        self.line.push_str(text);
        self.units = attempted;
        Ok(())
    }

    /// Build the final command line.
    pub fn build(self) -> CommandLine {
        CommandLine {
            program: self.program,
            line: self.line,
            program_end: self.program_end,
        }
    }
}

/// Re-quote every argument unchanged.
pub fn build_passthrough(
    program: &str,
    args: &[String],
    limit: usize,
) -> Result<CommandLine, BuildError> {
    let mut assembler = ArgAssembler::new(program, limit)?;
    for arg in args {
        assembler.push_quoted(arg)?;
    }
    Ok(assembler.build())
}

/// Re-quote every argument, expanding each deprecated-feature argument into
/// the full replacement set at its position.
pub fn build_rewritten(
    program: &str,
    args: &[String],
    rules: &RewriteRules,
    limit: usize,
) -> Result<CommandLine, BuildError> {
    let classified = classify(args, rules);
    build_classified(program, &classified.args, &rules.replacement_set, limit)
}

/// Assemble already-classified arguments: passthrough args are re-quoted,
/// deprecated ones become `replacement_set`.
pub fn build_classified(
    program: &str,
    args: &[ClassifiedArg],
    replacement_set: &[String],
    limit: usize,
) -> Result<CommandLine, BuildError> {
    let mut assembler = ArgAssembler::new(program, limit)?;
    for arg in args {
        match arg {
            ClassifiedArg::Deprecated(_) => assembler.push_replacement(replacement_set)?,
            ClassifiedArg::Passthrough(raw) => assembler.push_quoted(raw)?,
        }
    }
    Ok(assembler.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 32767;

    fn raw(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn passthrough_quotes_only_when_needed() {
        let line = build_passthrough(
            "dism-origin.exe",
            &raw(&["/online", "/image:C:\\my image", r#"He said "hi""#]),
            LIMIT,
        )
        .unwrap();
        assert_eq!(
            line.as_str(),
            r#"dism-origin.exe /online "/image:C:\my image" "He said \"hi\"""#
        );
        assert_eq!(line.program(), "dism-origin.exe");
    }

    #[test]
    fn program_with_spaces_is_quoted() {
        let line = build_passthrough(r"C:\Tools Dir\dism-origin.exe", &raw(&["/online"]), LIMIT)
            .unwrap();
        assert_eq!(line.as_str(), r#""C:\Tools Dir\dism-origin.exe" /online"#);
        assert_eq!(line.arguments_text(), "/online");
        assert_eq!(line.program(), r"C:\Tools Dir\dism-origin.exe");
    }

    #[test]
    fn no_arguments_is_just_program() {
        let line = build_passthrough("dism-origin.exe", &[], LIMIT).unwrap();
        assert_eq!(line.as_str(), "dism-origin.exe");
        assert_eq!(line.arguments_text(), "");
        assert!(line.arguments().is_empty());
    }

    #[test]
    fn rewritten_expands_in_place() {
        let line = build_rewritten(
            "dism-origin.exe",
            &raw(&["/online", "/enable-feature", "/FeatureName:IIS-LegacySnapIn", "/all"]),
            &RewriteRules::default(),
            LIMIT,
        )
        .unwrap();
        assert_eq!(
            line.as_str(),
            "dism-origin.exe /online /enable-feature \
             /featurename:IIS-ManagementScriptingTools /featurename:IIS-ManagementService /all"
        );
    }

    #[test]
    fn limit_counts_terminator() {
        // Quoted "p" (3) + " " + 3 chars = 7 units; needs a limit of at least 8.
        assert!(build_passthrough("p", &raw(&["abc"]), 8).is_ok());
        assert_eq!(
            build_passthrough("p", &raw(&["abc"]), 7),
            Err(BuildError::TooLong {
                limit: 7,
                attempted: 7
            })
        );
    }

    #[test]
    fn limit_uses_utf16_units() {
        // U+1F600 is two UTF-16 units but four UTF-8 bytes.
        assert!(build_passthrough("p", &raw(&["\u{1F600}"]), 7).is_ok());
        assert!(build_passthrough("p", &raw(&["\u{1F600}"]), 6).is_err());
    }

    #[test]
    fn unquoted_program_is_charged_for_spawn_quotes() {
        // "dism-origin.exe" is 15 units, 17 once the OS line quotes it.
        let line = build_passthrough("dism-origin.exe", &[], 18).unwrap();
        assert_eq!(line.as_str(), "dism-origin.exe");
        assert_eq!(
            build_passthrough("dism-origin.exe", &[], 17),
            Err(BuildError::TooLong {
                limit: 17,
                attempted: 17
            })
        );

        // Already quoted: no extra charge.
        assert!(build_passthrough("a b", &[], 6).is_ok());
        assert!(build_passthrough("a b", &[], 5).is_err());
    }

    #[test]
    fn classified_args_assemble_without_reclassifying() {
        let args = vec![
            ClassifiedArg::Passthrough("/online".into()),
            ClassifiedArg::Deprecated("anything".into()),
            ClassifiedArg::Passthrough("x y".into()),
        ];
        let line = build_classified("p", &args, &raw(&["/a", "/b"]), LIMIT).unwrap();
        assert_eq!(line.as_str(), r#"p /online /a /b "x y""#);
    }
}
