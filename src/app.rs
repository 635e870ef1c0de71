//! One wrapper invocation: banner, plan, launch, exit code.

use crate::args::build_launch_plan;
use crate::config::WrapperConfig;
use crate::process::{OutputMode, ProcessRunner};

const BANNER_PREFIX: &str = "[DISM WRAPPER]";

fn banner(line: &str) {
    println!("{BANNER_PREFIX} {line}");
}

/// Run the wrapper for `argv` (program name first) and return the exit code
/// to report to the caller.
pub async fn run(argv: &[String], config: &WrapperConfig) -> i32 {
    banner(&format!(
        "Version {} - IIS Legacy SnapIn Interceptor",
        env!("CARGO_PKG_VERSION")
    ));
    banner(&format!("Detected command: {}", argv.join(" ")));

    let raw_args = argv.get(1..).unwrap_or_default();
    let target = config.resolve_target();
    let target = target.to_string_lossy();

    let plan = match build_launch_plan(raw_args, &target, config) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!(error = %e, "command line build failed, nothing spawned");
            eprintln!("ERROR: Failed to build command line: {e}");
            return config.fallback_exit_code;
        }
    };

    tracing::info!(
        replaced = plan.replaced,
        intercept = plan.intercept_output,
        "launch plan ready"
    );
    for notice in &plan.notices {
        banner(notice);
    }
    banner(&format!("Executing: {}", plan.command_line));
    let mode = if plan.intercept_output {
        banner("Output will be intercepted and modified");
        OutputMode::Intercept
    } else {
        OutputMode::Inherit
    };
    println!();

    let runner = ProcessRunner::new(config);
    match runner.run(plan.command_line, mode).await {
        Ok(code) => {
            if mode == OutputMode::Inherit {
                println!();
                banner(&format!("Process completed with exit code {code}"));
            }
            code
        }
        Err(e) => {
            tracing::error!(error = %e, os_code = ?e.os_code(), "target launch failed");
            eprintln!("ERROR: {e}");
            config.fallback_exit_code
        }
    }
}
