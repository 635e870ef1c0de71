//! Rewrite rules: single source of truth for every recognized token.

/// Deprecated feature being phased out of the target's feature set.
pub const LEGACY_FEATURE_NAME: &str = "IIS-LegacySnapIn";

/// A set of spellings that all denote the same flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpellings {
    /// Lowercase spellings compared for exact equality.
    pub exact: Vec<String>,
    /// Lowercase spellings accepted anywhere inside an argument.
    pub contains: Vec<String>,
}

impl FlagSpellings {
    /// `/name` and `-name`, exact match only.
    pub fn switch(name: &str) -> Self {
        Self {
            exact: switch_forms(name),
            contains: Vec::new(),
        }
    }

    /// `/name` and `-name`, exact or attached to other text.
    pub fn switch_or_attached(name: &str) -> Self {
        let forms = switch_forms(name);
        Self {
            exact: forms.clone(),
            contains: forms,
        }
    }

    /// Check a lowercase argument against the spellings.
    pub fn matches(&self, lower_arg: &str) -> bool {
        self.exact.iter().any(|s| s == lower_arg)
            || self.contains.iter().any(|s| lower_arg.contains(s.as_str()))
    }
}

fn switch_forms(name: &str) -> Vec<String> {
    let name = name.to_lowercase();
    vec![format!("/{name}"), format!("-{name}")]
}

/// Immutable table of everything the classifier and builder look for.
///
/// The deprecated-argument patterns are derived from the feature name, so the
/// two never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRules {
    feature: String,
    deprecated_patterns: Vec<String>,
    /// Tokens substituted, in this order, for each deprecated argument.
    pub replacement_set: Vec<String>,
    /// "Operate on the running system".
    pub online: FlagSpellings,
    /// "Use English output".
    pub english: FlagSpellings,
    /// "List features".
    pub get_features: FlagSpellings,
}

impl RewriteRules {
    /// Rules that replace `feature` with `replacement_set`, using the
    /// standard online/english/get-features spellings.
    pub fn for_feature(feature: &str, replacement_set: Vec<String>) -> Self {
        Self {
            feature: feature.to_string(),
            deprecated_patterns: feature_patterns(feature),
            replacement_set,
            online: FlagSpellings::switch("online"),
            english: FlagSpellings::switch("english"),
            get_features: FlagSpellings::switch_or_attached("get-features"),
        }
    }

    /// Deprecated feature name, as written in notices.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Lowercase substrings identifying the deprecated feature argument.
    pub fn deprecated_patterns(&self) -> &[String] {
        &self.deprecated_patterns
    }
}

/// The three accepted spellings of `featurename:<feature>`.
fn feature_patterns(feature: &str) -> Vec<String> {
    let feature = feature.to_lowercase();
    vec![
        format!("/featurename:{feature}"),
        format!("-featurename:{feature}"),
        format!("featurename:{feature}"),
    ]
}

impl Default for RewriteRules {
    fn default() -> Self {
        Self::for_feature(
            LEGACY_FEATURE_NAME,
            vec![
                "/featurename:IIS-ManagementScriptingTools".to_string(),
                "/featurename:IIS-ManagementService".to_string(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_patterns_cover_three_spellings() {
        let rules = RewriteRules::default();
        assert_eq!(rules.feature(), "IIS-LegacySnapIn");
        assert_eq!(
            rules.deprecated_patterns(),
            [
                "/featurename:iis-legacysnapin",
                "-featurename:iis-legacysnapin",
                "featurename:iis-legacysnapin",
            ]
        );
    }

    #[test]
    fn custom_feature_drives_patterns() {
        let rules = RewriteRules::for_feature("Old-Thing", vec!["/featurename:New".into()]);
        assert_eq!(rules.feature(), "Old-Thing");
        assert!(rules
            .deprecated_patterns()
            .iter()
            .all(|p| p.ends_with("featurename:old-thing")));
        assert_eq!(rules.online, RewriteRules::default().online);
    }

    #[test]
    fn switch_matches_exact_only() {
        let online = FlagSpellings::switch("Online");
        assert!(online.matches("/online"));
        assert!(online.matches("-online"));
        assert!(!online.matches("/online:x"));
        assert!(!online.matches("online"));
    }

    #[test]
    fn attached_switch_matches_substring() {
        let get = FlagSpellings::switch_or_attached("get-features");
        assert!(get.matches("/get-features"));
        assert!(get.matches("/get-features:table"));
        assert!(get.matches("x-get-featuresy"));
        assert!(!get.matches("get-features"));
    }
}
