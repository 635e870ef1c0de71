//! Argument handling pipeline for the DISM wrapper.
//!
//! ```text
//! Raw args → Classify → Assemble (passthrough | rewritten) → LaunchPlan
//! ```
//!
//! Each stage is a pure function that can be unit-tested independently.

mod assembler;
mod classifier;
mod pipeline;
mod quoting;
mod registry;

pub use assembler::{
    build_classified, build_passthrough, build_rewritten, ArgAssembler, BuildError, CommandLine,
};
pub use classifier::{
    classify, count_deprecated_feature_arguments, is_deprecated_feature_argument,
    is_feature_query_command, ClassifiedArg, Classification,
};
pub use pipeline::{build_launch_plan, LaunchPlan};
pub use quoting::{needs_quotes, quote_argument, split_command_line};
pub use registry::{FlagSpellings, RewriteRules, LEGACY_FEATURE_NAME};
