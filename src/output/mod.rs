//! Output relabeling for intercepted stdout.
//!
//! A single literal-to-literal substitution applied to each chunk read from
//! the child. A match split across two chunks is not detected; chunks are
//! scanned independently.

use std::borrow::Cow;

/// Replace every occurrence of `old` in `text` with `new`.
///
/// Scans left to right, greedy and non-overlapping. Returns the input
/// unchanged (borrowed) when `text` or `old` is empty or nothing matched.
///
/// Re-applying is idempotent only if `new` does not contain `old`.
pub fn replace_token<'a>(text: &'a [u8], old: &[u8], new: &[u8]) -> Cow<'a, [u8]> {
    if text.is_empty() || old.is_empty() {
        return Cow::Borrowed(text);
    }
    let Some(first) = find(text, old, 0) else {
        return Cow::Borrowed(text);
    };

    let mut out = Vec::with_capacity(text.len() + new.len().saturating_sub(old.len()));
    out.extend_from_slice(&text[..first]);
    out.extend_from_slice(new);
    let mut pos = first + old.len();

    while let Some(at) = find(text, old, pos) {
        out.extend_from_slice(&text[pos..at]);
        out.extend_from_slice(new);
        pos = at + old.len();
    }
    out.extend_from_slice(&text[pos..]);
    Cow::Owned(out)
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// The configured old → new feature-name pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRelabel {
    pub old: String,
    pub new: String,
}

impl OutputRelabel {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    /// Relabel one chunk of child output.
    pub fn apply<'a>(&self, chunk: &'a [u8]) -> Cow<'a, [u8]> {
        replace_token(chunk, self.old.as_bytes(), self.new.as_bytes())
    }
}

impl Default for OutputRelabel {
    fn default() -> Self {
        Self::new("IIS-ManagementScriptingTools", "IIS-LegacySnapIn")
    }
}
