use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use shared_models::auth::{JwtClaims, User};

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum JwtError {
    #[error("JWT secret is not set")]
    MissingSecret,

    #[error("Invalid token format")]
    InvalidFormat,

    #[error("Invalid signature encoding")]
    InvalidSignatureEncoding,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid claims encoding")]
    InvalidClaimsEncoding,

    #[error("Invalid claims format")]
    InvalidClaims,

    #[error("Token expired")]
    Expired,
}

pub fn validate_token(token: &str, jwt_secret: &str) -> Result<User, JwtError> {
    if jwt_secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let mut parts = token.split('.');
    let (header_b64, claims_b64, signature_b64) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(c), Some(s), None) => (h, c, s),
            _ => return Err(JwtError::InvalidFormat),
        };

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
        debug!("Failed to decode signature: {}", e);
        JwtError::InvalidSignatureEncoding
    })?;

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| JwtError::MissingSecret)?;
    mac.update(format!("{}.{}", header_b64, claims_b64).as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err(JwtError::InvalidSignature);
    }

    let claims_bytes = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| JwtError::InvalidClaimsEncoding)?;

    let claims: JwtClaims = serde_json::from_slice(&claims_bytes).map_err(|e| {
        debug!("Failed to parse claims: {}", e);
        JwtError::InvalidClaims
    })?;

    if let Some(exp) = claims.exp {
        let now = Utc::now().timestamp().max(0) as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err(JwtError::Expired);
        }
    }

    let created_at = claims
        .iat
        .and_then(|timestamp| i64::try_from(timestamp).ok())
        .and_then(|timestamp| Utc.timestamp_opt(timestamp, 0).single());

    let user = User {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
        created_at,
    };

    debug!("Token validated successfully for user: {}", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{JwtTestUtils, TestUser};
    use assert_matches::assert_matches;

    const SECRET: &str = "test-secret-key-for-jwt-validation-must-be-long-enough";

    #[test]
    fn test_valid_token_resolves_user() {
        let test_user = TestUser::patient("patient@example.com");
        let token = JwtTestUtils::create_test_token(&test_user, SECRET, Some(1));

        let user = validate_token(&token, SECRET).unwrap();
        assert_eq!(user.id, test_user.id);
        assert_eq!(user.email.as_deref(), Some("patient@example.com"));
        assert_eq!(user.role.as_deref(), Some("patient"));
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_rejects_wrong_signature() {
        let token = JwtTestUtils::create_invalid_signature_token(&TestUser::default());
        assert_matches!(validate_token(&token, SECRET), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_rejects_expired_token() {
        let token = JwtTestUtils::create_expired_token(&TestUser::default(), SECRET);
        assert_matches!(validate_token(&token, SECRET), Err(JwtError::Expired));
    }

    #[test]
    fn test_rejects_malformed_token() {
        assert_matches!(validate_token("only.two", SECRET), Err(JwtError::InvalidFormat));
        assert_matches!(
            validate_token(&JwtTestUtils::create_malformed_token(), SECRET),
            Err(JwtError::InvalidSignatureEncoding)
        );
    }

    fn sign_claims(claims: serde_json::Value, secret: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signing_input = format!("{}.{}", header, payload);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signing_input.as_bytes());
        format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_out_of_range_issued_at_leaves_created_at_empty() {
        let token = sign_claims(
            serde_json::json!({ "sub": "user-1", "iat": u64::MAX }),
            SECRET,
        );

        let user = validate_token(&token, SECRET).unwrap();
        assert_eq!(user.id, "user-1");
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_rejects_when_secret_missing() {
        assert_matches!(validate_token("a.b.c", ""), Err(JwtError::MissingSecret));
    }
}
