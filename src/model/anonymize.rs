//! Anonymization rule tables and results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A literal phrase (matched case-insensitively) and its neutral substitute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReplacementRule {
    pub pattern: String,
    pub replacement: String,
}

#[cfg(test)]
impl ReplacementRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// A named ruleset as written in YAML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesetDefinition {
    /// Drop a standalone "the"/"a"/"an" directly before a match whose
    /// replacement starts with its own determiner.
    #[serde(default)]
    pub collapse_determiners: bool,
    #[serde(default)]
    pub rules: Vec<ReplacementRule>,
}

/// Ruleset table: the embedded defaults and the `anonymizer` section of the
/// config file share this shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesetTable {
    #[serde(default)]
    pub default_ruleset: Option<String>,
    #[serde(default)]
    pub rulesets: BTreeMap<String, RulesetDefinition>,
}

/// Outcome of a blind-read pass over one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizationResult {
    pub original_text: String,
    pub blind_text: String,
}
