//! Session token pair.

use secrecy::{ExposeSecret, SecretString};

use super::claims;

/// The two bearer tokens minted by a successful code exchange.
///
/// The pair is stored and cleared strictly together: the session store
/// never holds one token without the other.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    /// OIDC identity token carrying the user's claims.
    pub id_token: SecretString,
    /// Access token presented to APIs.
    pub access_token: SecretString,
}

impl SessionTokens {
    /// Create a token pair.
    pub fn new(id_token: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            id_token: SecretString::from(id_token.into()),
            access_token: SecretString::from(access_token.into()),
        }
    }

    /// True when both tokens decode and are unexpired.
    pub fn are_valid(&self) -> bool {
        claims::is_token_valid(Some(self.id_token.expose_secret().as_str()))
            && claims::is_token_valid(Some(self.access_token.expose_secret().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use chrono::Utc;

    fn token_with_expiry(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{}}}"#, exp));
        format!("{}.{}.sig", header, payload)
    }

    #[test]
    fn test_pair_valid_when_both_unexpired() {
        let exp = Utc::now().timestamp() + 3600;
        let tokens = SessionTokens::new(token_with_expiry(exp), token_with_expiry(exp));
        assert!(tokens.are_valid());
    }

    #[test]
    fn test_pair_invalid_when_either_expired() {
        let future = Utc::now().timestamp() + 3600;
        let past = Utc::now().timestamp() - 1;

        let tokens = SessionTokens::new(token_with_expiry(past), token_with_expiry(future));
        assert!(!tokens.are_valid());

        let tokens = SessionTokens::new(token_with_expiry(future), token_with_expiry(past));
        assert!(!tokens.are_valid());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let tokens = SessionTokens::new("id-secret", "access-secret");
        let rendered = format!("{:?}", tokens);
        assert!(!rendered.contains("id-secret"));
        assert!(!rendered.contains("access-secret"));
    }
}
