//! Lexical signal detection for claim scoring

use regex::Regex;

use crate::model::ClaimSignals;

/// Sensational or absolute phrasing
pub const SENSATIONAL_TERMS: &[&str] = &[
    "₹",
    "crore",
    "always",
    "never",
    "guaranteed",
    "everyone",
    "100%",
    "promised",
    "massive",
];

/// References to sources or authorities
pub const AUTHORITY_TERMS: &[&str] = &[
    "source:",
    "eci",
    "election commission",
    "law commission",
    "report no.",
    "pdf",
    "doi",
    "http://",
    "https://",
    "footnote",
    "appendix",
];

/// Cautious language
pub const HEDGING_TERMS: &[&str] = &["may", "could", "suggests", "likely", "estimates", "appears"];

const LINK_PATTERN: &str = r"https?://";

/// Keyword-set and link detector. Built once and shared across requests.
#[derive(Debug, Clone)]
pub struct SignalDetector {
    link: Regex,
}

impl SignalDetector {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            link: Regex::new(LINK_PATTERN)?,
        })
    }

    pub fn detect(&self, text: &str) -> ClaimSignals {
        let lowered = text.to_lowercase();
        ClaimSignals {
            sensational: contains_any(&lowered, SENSATIONAL_TERMS),
            authority: contains_any(&lowered, AUTHORITY_TERMS),
            hedging: contains_any(&lowered, HEDGING_TERMS),
            // Counted on the raw text, so only lowercase schemes are links
            link_count: self.link.find_iter(text).count(),
            length: text.trim().chars().count(),
        }
    }
}

fn contains_any(lowered: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| lowered.contains(term))
}
