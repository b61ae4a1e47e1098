//! PKCE (Proof Key for Code Exchange) support for OAuth 2.0.
//!
//! Implements RFC 7636 for securing authorization code flows in public
//! clients that cannot hold a client secret.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;
use sha2::{Digest, Sha256};

/// PKCE code verifier: the per-attempt secret proven at token exchange.
///
/// Created fresh for every login attempt and held only in attempt
/// storage until the exchange completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeVerifier(String);

impl CodeVerifier {
    /// Generate a new random verifier.
    ///
    /// Draws 32 bytes from a cryptographically secure source and encodes
    /// them as padding-free base64url, yielding 43 characters. RFC 7636
    /// requires 43-128.
    pub fn generate() -> Self {
        let random_bytes: [u8; 32] = rand::thread_rng().gen();
        Self(URL_SAFE_NO_PAD.encode(random_bytes))
    }

    /// Wrap a verifier recovered from attempt storage.
    pub fn from_string(verifier: String) -> Self {
        Self(verifier)
    }

    /// Get the verifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the corresponding S256 code challenge.
    pub fn challenge(&self) -> CodeChallenge {
        CodeChallenge::from_verifier(self)
    }
}

/// PKCE code challenge: the public, one-way derivation of the verifier
/// embedded in the authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeChallenge(String);

impl CodeChallenge {
    /// The challenge method sent alongside the challenge.
    pub const METHOD: &'static str = "S256";

    /// Derive a challenge from a verifier.
    ///
    /// Computes SHA-256 over the verifier's UTF-8 bytes and encodes the
    /// digest as padding-free base64url.
    pub fn from_verifier(verifier: &CodeVerifier) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(verifier.as_str().as_bytes());
        Self(URL_SAFE_NO_PAD.encode(hasher.finalize()))
    }

    /// Get the challenge string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifier_length_and_charset() {
        let verifier = CodeVerifier::generate();
        assert_eq!(verifier.as_str().len(), 43);
        assert!((43..=128).contains(&verifier.as_str().len()));
        assert!(verifier
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_verifiers_are_unique() {
        let a = CodeVerifier::generate();
        let b = CodeVerifier::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_challenge_deterministic() {
        let verifier = CodeVerifier::from_string("test_verifier".to_string());
        assert_eq!(verifier.challenge(), verifier.challenge());
    }

    #[test]
    fn test_challenge_rfc7636_vector() {
        // Appendix B of RFC 7636.
        let verifier =
            CodeVerifier::from_string("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk".to_string());
        let challenge = verifier.challenge();
        assert_eq!(
            challenge.as_str(),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn test_challenge_changes_with_verifier() {
        let a = CodeVerifier::from_string("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string());
        let b = CodeVerifier::from_string("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaab".to_string());
        assert_ne!(a.challenge(), b.challenge());
    }

    #[test]
    fn test_challenge_is_urlsafe() {
        let challenge = CodeVerifier::generate().challenge();
        assert!(!challenge.as_str().contains('='));
        assert!(challenge
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
