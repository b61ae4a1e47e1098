//! JWT claim decoding and expiry validation.
//!
//! Decoding is a parser, not a verifier: the signature segment is never
//! checked (signature verification is the identity provider's remote
//! responsibility). Decoded claims are provider-asserted display data;
//! only `exp` feeds a decision, via the freshness check.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims carried by a Cognito identity token.
///
/// Every identity field is optional; claims this struct does not model
/// land in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Subject: the user pool's unique user id.
    pub sub: Option<String>,
    /// User's email address.
    pub email: Option<String>,
    /// User's display name.
    pub name: Option<String>,
    /// Whether the email address has been verified.
    pub email_verified: Option<bool>,
    /// The sign-in username assigned by the user pool.
    #[serde(rename = "cognito:username")]
    pub username: Option<String>,
    /// Expiration instant, epoch seconds.
    pub exp: Option<i64>,
    /// Claims not modeled above (`aud`, `iss`, `token_use`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decode the payload segment of a token without verifying its signature.
///
/// Splits on `.`, base64url-decodes the middle segment, and parses the
/// bytes as a JSON claim set. Returns `None` if the token is malformed
/// at any stage; decode failures never surface as errors.
pub fn decode_claims(token: &str) -> Option<IdTokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let json = String::from_utf8(bytes).ok()?;
    serde_json::from_str(&json).ok()
}

/// Check that a token is present, decodable, and not yet expired.
///
/// `exp` is compared in whole epoch seconds with no clock-skew
/// allowance: a token is valid iff `exp` is strictly in the future.
pub fn is_token_valid(token: Option<&str>) -> bool {
    let token = match token {
        Some(token) if !token.is_empty() => token,
        _ => return false,
    };

    let claims = match decode_claims(token) {
        Some(claims) => claims,
        None => return false,
    };

    claims
        .exp
        .map(|exp| exp > Utc::now().timestamp())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        format!("{}.{}.sig", header, URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_known_token() {
        // header {"alg":"none"}, payload {"sub":"u1"}
        let claims = decode_claims("eyJhbGciOiJub25lIn0.eyJzdWIiOiJ1MSJ9.sig").unwrap();
        assert_eq!(claims.sub.as_deref(), Some("u1"));
    }

    #[test]
    fn test_decode_identity_fields() {
        let token = encode_token(
            r#"{"sub":"abc-123","email":"user@example.com","name":"Jane Doe","email_verified":true,"cognito:username":"jdoe","exp":1825247600,"token_use":"id"}"#,
        );
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("abc-123"));
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
        assert_eq!(claims.name.as_deref(), Some("Jane Doe"));
        assert_eq!(claims.email_verified, Some(true));
        assert_eq!(claims.username.as_deref(), Some("jdoe"));
        assert_eq!(claims.exp, Some(1825247600));
        assert_eq!(
            claims.extra.get("token_use").and_then(|v| v.as_str()),
            Some("id")
        );
    }

    #[test]
    fn test_decode_malformed_inputs() {
        assert!(decode_claims("not-a-jwt").is_none());
        assert!(decode_claims("").is_none());
        assert!(decode_claims("a.!!!invalid-base64!!!.c").is_none());
        // Valid base64 that is not JSON.
        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(decode_claims(&not_json).is_none());
    }

    #[test]
    fn test_valid_token_with_future_expiry() {
        let exp = Utc::now().timestamp() + 3600;
        let token = encode_token(&format!(r#"{{"sub":"u1","exp":{}}}"#, exp));
        assert!(is_token_valid(Some(&token)));
    }

    #[test]
    fn test_expired_token() {
        let exp = Utc::now().timestamp() - 1;
        let token = encode_token(&format!(r#"{{"sub":"u1","exp":{}}}"#, exp));
        assert!(!is_token_valid(Some(&token)));
    }

    #[test]
    fn test_token_without_expiry() {
        let token = encode_token(r#"{"sub":"u1"}"#);
        assert!(!is_token_valid(Some(&token)));
    }

    #[test]
    fn test_absent_or_empty_token() {
        assert!(!is_token_valid(None));
        assert!(!is_token_valid(Some("")));
    }

    #[test]
    fn test_undecodable_token() {
        assert!(!is_token_valid(Some("garbage")));
    }
}
