//! Argument classifier: raw args → decision flags.
//!
//! Every check works on a transient lowercase copy of the argument; the
//! original text is never modified.

use crate::args::registry::RewriteRules;

/// A classified argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedArg {
    /// Names the deprecated feature; expands to the full replacement set.
    Deprecated(String),
    /// Forwarded to the target unchanged (re-quoted if needed).
    Passthrough(String),
}

/// Result of classifying the invocation's arguments.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Classified arguments in order.
    pub args: Vec<ClassifiedArg>,
    /// Number of deprecated-feature arguments.
    pub deprecated_count: usize,
    /// Whether the invocation is the English feature-list query.
    pub feature_query: bool,
}

/// Does `arg` name the deprecated feature in any accepted spelling?
///
/// Containment, not equality: the token may be glued to other text.
/// `None` (an argument that could not be read) never matches.
pub fn is_deprecated_feature_argument(arg: Option<&str>, rules: &RewriteRules) -> bool {
    let Some(arg) = arg else {
        return false;
    };
    let lower = arg.to_lowercase();
    rules
        .deprecated_patterns()
        .iter()
        .any(|pattern| lower.contains(pattern.as_str()))
}

/// Count deprecated-feature arguments (program name excluded).
pub fn count_deprecated_feature_arguments(args: &[String], rules: &RewriteRules) -> usize {
    args.iter()
        .filter(|a| is_deprecated_feature_argument(Some(a.as_str()), rules))
        .count()
}

/// Is this the "online + English + get-features" query?
///
/// All three flags must be present; order and case are irrelevant.
pub fn is_feature_query_command(args: &[String], rules: &RewriteRules) -> bool {
    let mut has_online = false;
    let mut has_english = false;
    let mut has_get_features = false;

    for arg in args {
        let lower = arg.to_lowercase();
        if rules.online.matches(&lower) {
            has_online = true;
        } else if rules.english.matches(&lower) {
            has_english = true;
        } else if rules.get_features.matches(&lower) {
            has_get_features = true;
        }
    }

    has_online && has_english && has_get_features
}

/// Classify raw args against the rules in one pass.
pub fn classify(raw_args: &[String], rules: &RewriteRules) -> Classification {
    let args: Vec<ClassifiedArg> = raw_args
        .iter()
        .map(|arg| {
            if is_deprecated_feature_argument(Some(arg.as_str()), rules) {
                ClassifiedArg::Deprecated(arg.clone())
            } else {
                ClassifiedArg::Passthrough(arg.clone())
            }
        })
        .collect();

    let deprecated_count = args
        .iter()
        .filter(|a| matches!(a, ClassifiedArg::Deprecated(_)))
        .count();

    Classification {
        args,
        deprecated_count,
        feature_query: is_feature_query_command(raw_args, rules),
    }
}
