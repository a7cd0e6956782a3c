//! Automated keyword check for single statements

use chrono::Utc;
use uuid::Uuid;

use crate::model::{StatementCheck, StatementVerdict};

pub const AUTOMATED_SOURCE: &str = "Automated Check";

const COST_EXPLANATION: &str = "Multiple reports, including the Law Commission, suggest simultaneous elections could significantly reduce the recurring cost of conducting separate elections.";
const EVM_EXPLANATION: &str = "EVMs in India are standalone devices not connected to any network, making remote hacking impossible.";
const UNVERIFIED_EXPLANATION: &str =
    "We could not verify this statement automatically. Our team will review it.";

/// Classify a statement against the known ONOE talking points
pub fn check_statement(statement: &str) -> StatementCheck {
    let lowered = statement.to_lowercase();
    let has = |term: &str| lowered.contains(term);

    let (verdict, explanation) = if has("onoe") && has("save") && has("money") {
        (StatementVerdict::True, COST_EXPLANATION)
    } else if has("evm") && has("hack") {
        (StatementVerdict::False, EVM_EXPLANATION)
    } else {
        (StatementVerdict::Unverified, UNVERIFIED_EXPLANATION)
    };

    StatementCheck {
        id: Uuid::new_v4(),
        statement: statement.to_string(),
        verdict,
        explanation: explanation.to_string(),
        source: AUTOMATED_SOURCE.to_string(),
        created_at: Utc::now(),
    }
}
