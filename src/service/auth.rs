//! Bearer token identification
//!
//! Identity is optional everywhere it is used: a missing, malformed or expired
//! token makes the caller anonymous rather than failing the request.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub id: String,
    pub exp: usize,
}

#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// User id from an `Authorization` header value, if it carries a valid token
    pub fn user_id(&self, authorization: Option<&str>) -> Option<String> {
        let token = authorization?.strip_prefix(BEARER_PREFIX)?.trim();
        if token.is_empty() {
            return None;
        }

        match decode::<TokenClaims>(token, &self.key, &self.validation) {
            Ok(data) => Some(data.claims.id),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid bearer token");
                None
            }
        }
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) fn issue_token(secret: &str, user_id: &str, ttl_seconds: i64) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let exp = (chrono::Utc::now().timestamp() + ttl_seconds) as usize;
    let claims = TokenClaims {
        id: user_id.to_string(),
        exp,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_valid_token() {
        let verifier = TokenVerifier::new(SECRET);
        let header = format!("Bearer {}", issue_token(SECRET, "user-42", 3600));
        assert_eq!(verifier.user_id(Some(&header)).as_deref(), Some("user-42"));
    }

    #[test]
    fn test_missing_or_wrong_scheme() {
        let verifier = TokenVerifier::new(SECRET);
        let token = issue_token(SECRET, "user-42", 3600);
        assert!(verifier.user_id(None).is_none());
        assert!(verifier.user_id(Some(&token)).is_none());
        assert!(verifier.user_id(Some(&format!("Basic {token}"))).is_none());
        assert!(verifier.user_id(Some("Bearer ")).is_none());
    }

    #[test]
    fn test_wrong_secret_or_expired() {
        let verifier = TokenVerifier::new(SECRET);
        let forged = format!("Bearer {}", issue_token("other", "user-42", 3600));
        assert!(verifier.user_id(Some(&forged)).is_none());

        let expired = format!("Bearer {}", issue_token(SECRET, "user-42", -3600));
        assert!(verifier.user_id(Some(&expired)).is_none());
    }
}
