//! Heuristic plausibility scoring for short claims

use crate::model::{ClaimAnalysis, ClaimSignals, Verdict};
use crate::service::signals::SignalDetector;

const BASE_SCORE: i32 = 50;
const SENSATIONAL_PENALTY: i32 = -15;
const AUTHORITY_BONUS: i32 = 20;
const HEDGING_BONUS: i32 = 5;
const MULTI_LINK_BONUS: i32 = 10;
const MIN_LINKS: usize = 2;
const SHORT_PENALTY: i32 = -20;
const SHORT_BELOW: usize = 40;
const LONG_BONUS: i32 = 5;
const LONG_ABOVE: usize = 500;

pub const REASON_SENSATIONAL: &str = "Contains sensational or absolute phrasing.";
pub const REASON_AUTHORITY: &str = "Mentions sources or authoritative references.";
pub const REASON_HEDGING: &str = "Uses cautious/hedging language rather than absolutes.";
pub const REASON_LINKS: &str = "Multiple external references/links present.";
pub const REASON_SHORT: &str = "Very short or out-of-context claim.";
pub const REASON_LONG: &str = "Longer context provided.";

/// Stateless claim scorer; safe to share across workers
#[derive(Debug, Clone)]
pub struct ClaimScorer {
    detector: SignalDetector,
}

impl ClaimScorer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            detector: SignalDetector::new()?,
        })
    }

    /// Score a non-empty claim. Empty input is rejected by the caller.
    pub fn analyze(&self, text: &str) -> ClaimAnalysis {
        let signals = self.detector.detect(text);
        let analysis = score(&signals);

        tracing::debug!(
            verdict = ?analysis.verdict,
            confidence = analysis.confidence,
            link_count = signals.link_count,
            length = signals.length,
            "Scored claim"
        );

        analysis
    }
}

/// Every applicable check fires, in order; the score is clamped once at the end.
pub fn score(signals: &ClaimSignals) -> ClaimAnalysis {
    let mut score = BASE_SCORE;
    let mut reasons = Vec::new();

    if signals.sensational {
        score += SENSATIONAL_PENALTY;
        reasons.push(REASON_SENSATIONAL.to_string());
    }
    if signals.authority {
        score += AUTHORITY_BONUS;
        reasons.push(REASON_AUTHORITY.to_string());
    }
    if signals.hedging {
        score += HEDGING_BONUS;
        reasons.push(REASON_HEDGING.to_string());
    }
    if signals.link_count >= MIN_LINKS {
        score += MULTI_LINK_BONUS;
        reasons.push(REASON_LINKS.to_string());
    }
    if signals.length < SHORT_BELOW {
        score += SHORT_PENALTY;
        reasons.push(REASON_SHORT.to_string());
    } else if signals.length > LONG_ABOVE {
        score += LONG_BONUS;
        reasons.push(REASON_LONG.to_string());
    }

    let confidence = score.clamp(0, 100) as u8;

    ClaimAnalysis {
        verdict: Verdict::from_score(confidence),
        confidence,
        reasons,
    }
}
