//! Blind-read anonymization over named rulesets

use std::collections::{BTreeMap, HashSet};

use crate::model::{AnonymizationResult, RulesetDefinition, RulesetTable};
use crate::service::matching::Substituter;

/// Name of the ruleset used when neither the config nor the request picks one
pub const DEFAULT_RULESET: &str = "descriptive";

const BUILTIN_RULESETS: &str = include_str!("../../assets/rulesets.yaml");

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AnonymizerError {
    #[error("Unknown ruleset: {0}")]
    UnknownRuleset(String),

    #[error("Ruleset {0} has no rules")]
    EmptyRuleset(String),

    #[error("Ruleset {ruleset} contains an empty pattern")]
    EmptyPattern { ruleset: String },

    #[error("Ruleset {ruleset} declares pattern {pattern:?} more than once")]
    DuplicatePattern { ruleset: String, pattern: String },

    #[error("Ruleset {ruleset} failed to compile: {source}")]
    Compile {
        ruleset: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid built-in ruleset table: {0}")]
    Builtin(#[from] serde_yaml::Error),
}

/// One compiled ruleset
#[derive(Debug, Clone)]
pub struct Anonymizer {
    name: String,
    substituter: Substituter,
}

impl Anonymizer {
    pub fn new(name: &str, definition: &RulesetDefinition) -> Result<Self, AnonymizerError> {
        validate(name, definition)?;
        let substituter = Substituter::new(&definition.rules, definition.collapse_determiners)
            .map_err(|source| AnonymizerError::Compile {
                ruleset: name.to_string(),
                source,
            })?;
        Ok(Self {
            name: name.to_string(),
            substituter,
        })
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn anonymize(&self, text: &str) -> String {
        self.substituter.apply(text)
    }

    pub fn process(&self, text: &str) -> AnonymizationResult {
        let blind_text = self.anonymize(text);
        tracing::debug!(
            ruleset = %self.name,
            input_chars = text.chars().count(),
            output_chars = blind_text.chars().count(),
            "Anonymized text"
        );
        AnonymizationResult {
            original_text: text.to_string(),
            blind_text,
        }
    }
}

fn validate(name: &str, definition: &RulesetDefinition) -> Result<(), AnonymizerError> {
    if definition.rules.is_empty() {
        return Err(AnonymizerError::EmptyRuleset(name.to_string()));
    }

    let mut seen = HashSet::new();
    for rule in &definition.rules {
        if rule.pattern.is_empty() {
            return Err(AnonymizerError::EmptyPattern {
                ruleset: name.to_string(),
            });
        }
        if !seen.insert(rule.pattern.to_lowercase()) {
            return Err(AnonymizerError::DuplicatePattern {
                ruleset: name.to_string(),
                pattern: rule.pattern.clone(),
            });
        }
    }

    Ok(())
}

/// All loaded rulesets, immutable after startup
#[derive(Debug, Clone)]
pub struct AnonymizerRegistry {
    rulesets: BTreeMap<String, Anonymizer>,
    default: String,
}

impl AnonymizerRegistry {
    /// Built-in rulesets only
    #[cfg(test)]
    pub fn builtin() -> Result<Self, AnonymizerError> {
        Self::with_overrides(RulesetTable::default())
    }

    /// Built-in rulesets with the config file's rulesets layered on top.
    /// A configured ruleset replaces a built-in one of the same name.
    pub fn with_overrides(overrides: RulesetTable) -> Result<Self, AnonymizerError> {
        let builtin: RulesetTable = serde_yaml::from_str(BUILTIN_RULESETS)?;

        let default = overrides
            .default_ruleset
            .or(builtin.default_ruleset)
            .unwrap_or_else(|| DEFAULT_RULESET.to_string());

        let mut definitions = builtin.rulesets;
        definitions.extend(overrides.rulesets);

        let rulesets = definitions
            .iter()
            .map(|(name, definition)| Ok((name.clone(), Anonymizer::new(name, definition)?)))
            .collect::<Result<BTreeMap<_, _>, AnonymizerError>>()?;

        if !rulesets.contains_key(&default) {
            return Err(AnonymizerError::UnknownRuleset(default));
        }

        tracing::info!(
            default = %default,
            rulesets = ?rulesets.keys().collect::<Vec<_>>(),
            "Anonymization rulesets loaded"
        );

        Ok(Self { rulesets, default })
    }

    /// Look up a ruleset; `None` selects the default
    pub fn get(&self, name: Option<&str>) -> Result<&Anonymizer, AnonymizerError> {
        let name = name.unwrap_or(&self.default);
        self.rulesets
            .get(name)
            .ok_or_else(|| AnonymizerError::UnknownRuleset(name.to_string()))
    }

    pub fn default_anonymizer(&self) -> &Anonymizer {
        // Presence of the default is checked at construction
        &self.rulesets[&self.default]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rulesets.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReplacementRule;

    fn descriptive() -> Anonymizer {
        AnonymizerRegistry::builtin()
            .unwrap()
            .default_anonymizer()
            .clone()
    }

    #[test]
    fn test_builtin_default_is_descriptive() {
        let registry = AnonymizerRegistry::builtin().unwrap();
        assert_eq!(registry.default_anonymizer().name(), "descriptive");
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["chatbot", "descriptive", "lettered"]);
    }

    #[test]
    fn test_leaders_places_and_parties() {
        let a = descriptive();
        assert_eq!(
            a.anonymize("The Prime Minister met the Chief Minister in Delhi regarding BJP policy."),
            "the head of government met the head of the regional government in the national capital regarding a national political party policy."
        );
    }

    #[test]
    fn test_state_government_is_one_phrase() {
        let a = descriptive();
        let out = a.anonymize("the state government announced");
        assert_eq!(out, "the regional administration announced");
        assert!(!out.contains("state"));
    }

    #[test]
    fn test_full_party_names_before_abbreviations() {
        let a = descriptive();
        assert_eq!(
            a.anonymize("Indian National Congress and Trinamool Congress"),
            "a national opposition party and a regional political party"
        );
        assert_eq!(
            a.anonymize("Bharatiya Janata Party (BJP)"),
            "a national political party (a national political party)"
        );
    }

    #[test]
    fn test_central_government_and_country() {
        let a = descriptive();
        assert_eq!(
            a.anonymize("India's central government"),
            "the country's the national administration"
        );
    }

    #[test]
    fn test_substring_imprecision_is_preserved() {
        let a = descriptive();
        assert_eq!(
            a.anonymize("DISTINCT results"),
            "DISTa national opposition partyT results"
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(descriptive().anonymize(""), "");
    }

    #[test]
    fn test_idempotent_on_builtin_samples() {
        let a = descriptive();
        let samples = [
            "The Prime Minister announced that the BJP supports One Nation One Election.",
            "The Congress party raised concerns. The Chief Minister said regional parties like TMC and DMK must be consulted.",
            "The state government and the central government disagree with the PM in Delhi.",
            "AAP and the Aam Aadmi Party are the same, says the CM of India.",
        ];
        for sample in samples {
            let once = a.anonymize(sample);
            assert_eq!(a.anonymize(&once), once, "not a fixed point: {sample}");
        }
    }

    #[test]
    fn test_idempotent_on_other_builtin_rulesets() {
        let registry = AnonymizerRegistry::builtin().unwrap();
        let cases = [
            ("lettered", "The Prime Minister announced that the BJP supports it. The Chief Minister said TMC and DMK must be consulted."),
            ("lettered", "Bharatiya Janata Party and Congress"),
            ("lettered", "Aam Aadmi Party Alliance"),
            ("lettered", "AAP and the Aam Aadmi Party are the same, says the CM"),
            ("chatbot", "Narendra Modi met BJP and Congress leaders with Amit Shah"),
        ];
        for (name, sample) in cases {
            let a = registry.get(Some(name)).unwrap();
            let once = a.anonymize(sample);
            assert_eq!(a.anonymize(&once), once, "not a fixed point in {name}: {sample}");
        }
    }

    #[test]
    fn test_pattern_next_to_replacement_text() {
        let registry = AnonymizerRegistry::builtin().unwrap();
        let lettered = registry.get(Some("lettered")).unwrap();
        assert_eq!(
            lettered.anonymize("Bharatiya Janata Party and Congress"),
            "Party A and Party B"
        );
        assert_eq!(lettered.anonymize("Aam Aadmi Party Alliance"), "Party C Alliance");
        assert_eq!(
            descriptive().anonymize("India national political party"),
            "the country national political party"
        );
    }

    /// Glue each pattern to every replacement phrase wherever the pattern's
    /// edge spells the start or end of that phrase, then check no pattern
    /// survives outside the inserted phrases.
    #[test]
    fn test_no_pattern_survives_overlap_with_phrases() {
        let table: RulesetTable = serde_yaml::from_str(BUILTIN_RULESETS).unwrap();
        for (name, definition) in &table.rulesets {
            let anonymizer = Anonymizer::new(name, definition).unwrap();
            let mut phrases: Vec<String> = definition
                .rules
                .iter()
                .map(|r| r.replacement.to_lowercase())
                .collect();
            phrases.sort();
            phrases.dedup();
            phrases.sort_by_key(|p| std::cmp::Reverse(p.len()));

            for rule in &definition.rules {
                let pattern = rule.pattern.to_lowercase();
                let mut inputs = Vec::new();
                for phrase in &phrases {
                    for k in 1..pattern.len().min(phrase.len()) {
                        if pattern.ends_with(&phrase[..k]) {
                            inputs.push(format!("{}{}", rule.pattern, &phrase[k..]));
                        }
                        if phrase.ends_with(&pattern[..k]) {
                            inputs.push(format!("{}{}", &phrase[..phrase.len() - k], rule.pattern));
                        }
                    }
                }

                for input in inputs {
                    let mut rest = anonymizer.anonymize(&input).to_lowercase();
                    for phrase in &phrases {
                        rest = rest.replace(phrase.as_str(), "|");
                    }
                    for other in &definition.rules {
                        assert!(
                            !rest.contains(&other.pattern.to_lowercase()),
                            "{name}: {:?} left in {:?} from {:?}",
                            other.pattern,
                            rest,
                            input
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = descriptive();
        let text = "PM and CM visited Delhi";
        assert_eq!(a.anonymize(text), a.anonymize(text));
    }

    #[test]
    fn test_lettered_ruleset() {
        let registry = AnonymizerRegistry::builtin().unwrap();
        let lettered = registry.get(Some("lettered")).unwrap();
        assert_eq!(
            lettered.anonymize("The Prime Minister announced that the BJP supports it. The Chief Minister said TMC and DMK must be consulted."),
            "The Leader A announced that the Party A supports it. The Leader B said Party D and Party E must be consulted."
        );
        assert_eq!(lettered.anonymize("Trinamool Congress"), "Party D");
    }

    #[test]
    fn test_unknown_ruleset() {
        let registry = AnonymizerRegistry::builtin().unwrap();
        assert!(matches!(
            registry.get(Some("nope")),
            Err(AnonymizerError::UnknownRuleset(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_override_and_default_selection() {
        let mut overrides = RulesetTable {
            default_ruleset: Some("newsroom".to_string()),
            ..Default::default()
        };
        overrides.rulesets.insert(
            "newsroom".to_string(),
            RulesetDefinition {
                collapse_determiners: false,
                rules: vec![ReplacementRule::new("Lok Sabha", "the lower house")],
            },
        );
        let registry = AnonymizerRegistry::with_overrides(overrides).unwrap();
        assert_eq!(registry.default_anonymizer().name(), "newsroom");
        assert_eq!(
            registry.get(None).unwrap().anonymize("LOK SABHA session"),
            "the lower house session"
        );
        assert!(registry.get(Some("descriptive")).is_ok());
    }

    #[test]
    fn test_unknown_default_is_rejected() {
        let overrides = RulesetTable {
            default_ruleset: Some("missing".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            AnonymizerRegistry::with_overrides(overrides),
            Err(AnonymizerError::UnknownRuleset(_))
        ));
    }

    #[test]
    fn test_invalid_definitions() {
        let empty = RulesetDefinition::default();
        assert!(matches!(
            Anonymizer::new("x", &empty),
            Err(AnonymizerError::EmptyRuleset(_))
        ));

        let blank = RulesetDefinition {
            collapse_determiners: false,
            rules: vec![ReplacementRule::new("", "y")],
        };
        assert!(matches!(
            Anonymizer::new("x", &blank),
            Err(AnonymizerError::EmptyPattern { .. })
        ));

        let duplicate = RulesetDefinition {
            collapse_determiners: false,
            rules: vec![
                ReplacementRule::new("PM", "a"),
                ReplacementRule::new("pm", "b"),
            ],
        };
        assert!(matches!(
            Anonymizer::new("x", &duplicate),
            Err(AnonymizerError::DuplicatePattern { .. })
        ));
    }

    #[test]
    fn test_process_keeps_original() {
        let result = descriptive().process("Delhi");
        assert_eq!(result.original_text, "Delhi");
        assert_eq!(result.blind_text, "the national capital");
    }
}
