use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user's email address.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and checks HS256 bearer tokens.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn issue(&self, subject: &str) -> Result<String> {
        self.issue_at(subject, Utc::now())
    }

    /// Issues a token as if it had been minted at `issued_at`.
    pub fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Checks signature and expiry and returns the claims.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                AppError::Unauthorized
            })
    }

    pub fn extract_subject(&self, token: &str) -> Result<String> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Signature, expiry and subject all have to match.
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> bool {
        self.decode(token)
            .map(|claims| claims.sub == expected_subject)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", 48)
    }

    #[test]
    fn test_issued_token_validates() {
        let jwt = service();
        let token = jwt.issue("maya@example.com").unwrap();
        assert!(jwt.is_valid(&token, "maya@example.com"));
        assert_eq!(jwt.extract_subject(&token).unwrap(), "maya@example.com");
    }

    #[test]
    fn test_expiry_is_48_minutes() {
        let jwt = service();
        let token = jwt.issue("maya@example.com").unwrap();
        let claims = jwt.decode(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 48 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = service();
        let token = jwt
            .issue_at("maya@example.com", Utc::now() - Duration::hours(2))
            .unwrap();
        assert!(!jwt.is_valid(&token, "maya@example.com"));
        assert!(matches!(jwt.decode(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let jwt = service();
        let genuine = jwt.issue("maya@example.com").unwrap();
        let other = jwt.issue("omar@example.com").unwrap();

        // Omar's payload under Maya's signature.
        let genuine_parts: Vec<&str> = genuine.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let tampered = format!("{}.{}.{}", genuine_parts[0], other_parts[1], genuine_parts[2]);

        assert!(!jwt.is_valid(&tampered, "omar@example.com"));
        assert!(!jwt.is_valid(&tampered, "maya@example.com"));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = JwtService::new("other-secret", 48)
            .issue("maya@example.com")
            .unwrap();
        assert!(!service().is_valid(&token, "maya@example.com"));
    }

    #[test]
    fn test_subject_mismatch_rejected() {
        let jwt = service();
        let token = jwt.issue("maya@example.com").unwrap();
        assert!(!jwt.is_valid(&token, "omar@example.com"));
    }
}
