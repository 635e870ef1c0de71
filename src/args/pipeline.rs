//! Pipeline: ties the argument stages together.

use crate::args::assembler::{build_classified, BuildError, CommandLine};
use crate::args::classifier::classify;
use crate::config::WrapperConfig;

/// Ready-to-launch description of one invocation.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    /// Final command line for the target.
    pub command_line: CommandLine,
    /// Whether stdout must be intercepted and relabeled.
    pub intercept_output: bool,
    /// How many arguments were expanded into the replacement set.
    pub replaced: usize,
    /// Human-readable notices for the console banner.
    pub notices: Vec<String>,
}

/// Build the launch plan from raw user arguments (program name excluded).
///
/// Classify once → notices → assemble.
pub fn build_launch_plan(
    raw_args: &[String],
    target: &str,
    config: &WrapperConfig,
) -> Result<LaunchPlan, BuildError> {
    let rules = &config.rules;

    // Stage 1: Classify
    let classified = classify(raw_args, rules);
    let intercept_output = classified.feature_query;
    let replaced = classified.deprecated_count;

    // Stage 2: Notices
    let mut notices = Vec::new();
    if replaced > 0 {
        notices.push(format!(
            "Detected {} occurrence(s) of '{}'",
            replaced,
            rules.feature()
        ));
        notices.push(format!(
            "Replacing with {} modern feature(s): {}",
            rules.replacement_set.len(),
            rules.replacement_set.join(" ")
        ));
    } else {
        notices.push("No legacy features detected in command line".to_string());
        if intercept_output {
            notices.push("Will intercept and modify /get-features output".to_string());
        }
    }

    // Stage 3: Assemble (with no deprecated args this is the passthrough line)
    let command_line = build_classified(
        target,
        &classified.args,
        &rules.replacement_set,
        config.max_command_line,
    )?;

    tracing::debug!(
        replaced,
        intercept_output,
        command_line = %command_line,
        "launch plan built"
    );

    Ok(LaunchPlan {
        command_line,
        intercept_output,
        replaced,
        notices,
    })
}
