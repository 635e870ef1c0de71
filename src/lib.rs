//! Transparent DISM interceptor.
//!
//! Rewrites the deprecated `IIS-LegacySnapIn` feature into its modern
//! replacements before forwarding the invocation to the original executable,
//! and relabels the feature list printed by `/online /english /get-features`.

pub mod app;
pub mod args;
pub mod config;
pub mod logging;
pub mod output;
pub mod process;
