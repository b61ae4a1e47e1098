//! Hosted UI login URL construction.

use tracing::debug;
use url::Url;

use super::attempt::AttemptStorage;
use super::pkce::{CodeChallenge, CodeVerifier};
use crate::config::CognitoConfig;
use crate::error::{config_error, ConfigErrorKind, Error};

/// Scopes requested on every authorization request.
pub const SCOPES: &str = "openid email profile phone";

/// Build the hosted UI login URL for a fresh login attempt.
///
/// Validates the configuration, generates a new PKCE verifier, stashes
/// it in attempt storage (replacing any stale verifier from an abandoned
/// attempt), and returns the authorization URL embedding the derived
/// challenge. No network traffic happens here; the stash write completes
/// before this function returns, so the verifier is visible to the
/// callback processor on the next page load.
pub fn build_login_url<A: AttemptStorage>(
    config: &CognitoConfig,
    attempt: &A,
) -> Result<String, Error> {
    config.validate()?;

    let verifier = CodeVerifier::generate();
    let challenge = verifier.challenge();
    attempt.put_verifier(verifier.as_str());

    let url = Url::parse_with_params(
        &config.login_endpoint(),
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", SCOPES),
            ("code_challenge", challenge.as_str()),
            ("code_challenge_method", CodeChallenge::METHOD),
        ],
    )
    .map_err(|err| {
        config_error(
            ConfigErrorKind::InvalidDomain,
            &format!("hosted UI domain does not form a valid URL: {}", err),
        )
    })?;

    debug!("built hosted UI login URL");
    Ok(url.into())
}
