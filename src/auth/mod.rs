//! Bearer-token verification
//!
//! Validates the `Authorization` header against the pre-shared signing
//! secret. Only verification lives here; token issuance belongs to the
//! integration partner.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Decoded token claims.
///
/// The only claim the service relies on is `exp`; `name`/`sub` are carried
/// for diagnostic logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

impl Claims {
    /// Human-readable subject for log lines
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.sub.as_deref())
            .unwrap_or("unknown")
    }
}

/// Verifies HS256-signed bearer tokens against the shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from the shared signing secret
    pub fn new(secret: &str) -> Self {
        // Validation::default() is HS256 with expiry checking on
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Extract and verify the credential from a raw `Authorization` header.
    ///
    /// # Errors
    /// - `AppError::MissingCredential` when the header is absent or empty
    /// - `AppError::MalformedCredential` when the value is not the
    ///   two-token `Bearer <token>` shape
    /// - `AppError::InvalidOrExpiredCredential` when signature verification
    ///   fails or the token has expired
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, AppError> {
        let header = match header {
            Some(value) if !value.trim().is_empty() => value,
            _ => return Err(AppError::MissingCredential),
        };

        let token = parse_bearer(header).ok_or(AppError::MalformedCredential)?;

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token verification failed: {}", e);
            AppError::InvalidOrExpiredCredential
        })?;

        Ok(data.claims)
    }
}

/// Split a header value into the two-token `Bearer <token>` shape.
fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-signing-secret";

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> Claims {
        Claims {
            sub: Some("integration".to_string()),
            name: Some("Reporting Partner".to_string()),
            exp: chrono::Utc::now().timestamp() + 3600,
        }
    }

    #[test]
    fn test_missing_header_rejected() {
        let verifier = TokenVerifier::new(SECRET);

        assert!(matches!(
            verifier.verify_header(None),
            Err(AppError::MissingCredential)
        ));
        assert!(matches!(
            verifier.verify_header(Some("")),
            Err(AppError::MissingCredential)
        ));
        assert!(matches!(
            verifier.verify_header(Some("   ")),
            Err(AppError::MissingCredential)
        ));
    }

    #[test]
    fn test_malformed_header_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let token = sign(&valid_claims(), SECRET);

        // Wrong scheme
        assert!(matches!(
            verifier.verify_header(Some(&format!("Token {token}"))),
            Err(AppError::MalformedCredential)
        ));
        // Scheme without a credential
        assert!(matches!(
            verifier.verify_header(Some("Bearer")),
            Err(AppError::MalformedCredential)
        ));
        // Trailing junk
        assert!(matches!(
            verifier.verify_header(Some(&format!("Bearer {token} extra"))),
            Err(AppError::MalformedCredential)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let verifier = TokenVerifier::new(SECRET);

        assert!(matches!(
            verifier.verify_header(Some("Bearer not-a-token")),
            Err(AppError::InvalidOrExpiredCredential)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let token = sign(&valid_claims(), "some-other-secret");

        assert!(matches!(
            verifier.verify_header(Some(&format!("Bearer {token}"))),
            Err(AppError::InvalidOrExpiredCredential)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let mut claims = valid_claims();
        claims.exp = chrono::Utc::now().timestamp() - 3600;
        let token = sign(&claims, SECRET);

        assert!(matches!(
            verifier.verify_header(Some(&format!("Bearer {token}"))),
            Err(AppError::InvalidOrExpiredCredential)
        ));
    }

    #[test]
    fn test_valid_token_accepted() {
        let verifier = TokenVerifier::new(SECRET);
        let token = sign(&valid_claims(), SECRET);

        let claims = verifier
            .verify_header(Some(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(claims.display_name(), "Reporting Partner");
    }

    #[test]
    fn test_display_name_fallbacks() {
        let claims = Claims {
            sub: Some("svc".to_string()),
            name: None,
            exp: 0,
        };
        assert_eq!(claims.display_name(), "svc");

        let claims = Claims {
            sub: None,
            name: None,
            exp: 0,
        };
        assert_eq!(claims.display_name(), "unknown");
    }
}
