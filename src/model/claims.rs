//! Claim scoring models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lexical categories found in a claim. Computed per call and discarded after scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimSignals {
    pub sensational: bool,
    pub authority: bool,
    pub hedging: bool,
    pub link_count: usize,
    /// Character count after trimming surrounding whitespace
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Verdict {
    Factual,
    #[serde(rename = "Potentially Misleading")]
    PotentiallyMisleading,
    Unsupported,
}

impl Verdict {
    /// Map a clamped score onto the three verdict bands
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            Verdict::Factual
        } else if score >= 40 {
            Verdict::PotentiallyMisleading
        } else {
            Verdict::Unsupported
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClaimAnalysis {
    pub verdict: Verdict,
    /// Clamped score in [0, 100]
    pub confidence: u8,
    /// One entry per fired check, in evaluation order
    pub reasons: Vec<String>,
}
