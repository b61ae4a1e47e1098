//! Callback processing: authorization code consumption and token exchange.
//!
//! The processor runs once per provider redirect. It is a strict linear
//! state machine (code present, verifier present, exchange, response
//! complete, tokens valid, committed) where every check has exactly one
//! failure exit and no step retries. A failed run leaves the session
//! store and the stashed verifier untouched.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::attempt::AttemptStorage;
use crate::config::CognitoConfig;
use crate::error::{callback_error, CallbackErrorKind, Error};
use crate::token::{SessionStore, SessionTokens};

/// JSON body returned by the token endpoint.
///
/// Fields beyond the two committed tokens are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub id_token: Option<String>,
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}

/// Token-endpoint client seam.
///
/// The callback processor talks to the provider through this trait so
/// tests can substitute the network call and assert it was never made.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// POST the authorization-code grant and parse the JSON response.
    async fn exchange(
        &self,
        config: &CognitoConfig,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenResponse, Error>;
}

/// reqwest-backed exchanger posting `application/x-www-form-urlencoded`.
///
/// No retry and no client-side timeout: each callback is a single,
/// non-idempotent attempt, and a hung exchange is the caller's problem
/// to bound.
#[derive(Clone, Default)]
pub struct HttpTokenExchange {
    client: reqwest::Client,
}

impl HttpTokenExchange {
    /// Create an exchanger with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenExchange for HttpTokenExchange {
    async fn exchange(
        &self,
        config: &CognitoConfig,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenResponse, Error> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_verifier", code_verifier),
        ];

        let response = self
            .client
            .post(config.token_endpoint())
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(callback_error(
                CallbackErrorKind::ExchangeFailed,
                &format!("token endpoint returned HTTP {}: {}", status, body),
            ));
        }

        response.json::<TokenResponse>().await.map_err(Into::into)
    }
}

/// Drives the redirect-return half of the login flow.
///
/// One instance is expected to handle one callback per page load; the
/// provider's single-use code semantics are the only defense against
/// duplicate invocations.
pub struct CallbackProcessor<A, S, X = HttpTokenExchange> {
    config: CognitoConfig,
    attempt: A,
    store: S,
    exchanger: X,
}

impl<A, S> CallbackProcessor<A, S>
where
    A: AttemptStorage,
    S: SessionStore,
{
    /// Create a processor using the real HTTP token exchange.
    pub fn new(config: CognitoConfig, attempt: A, store: S) -> Self {
        Self::with_exchanger(config, attempt, store, HttpTokenExchange::new())
    }
}

impl<A, S, X> CallbackProcessor<A, S, X>
where
    A: AttemptStorage,
    S: SessionStore,
    X: TokenExchange,
{
    /// Create a processor with a custom exchanger.
    pub fn with_exchanger(config: CognitoConfig, attempt: A, store: S, exchanger: X) -> Self {
        Self {
            config,
            attempt,
            store,
            exchanger,
        }
    }

    /// Process the provider redirect; true means a session is committed.
    ///
    /// All failure detail collapses to `false` by design: the caller's
    /// only reasonable recovery is returning the user to login. Each
    /// branch is logged before collapsing.
    pub async fn handle_callback(&self, callback_url: &str) -> bool {
        match self.process(callback_url).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "callback failed");
                false
            }
        }
    }

    async fn process(&self, callback_url: &str) -> Result<(), Error> {
        let code = extract_code(callback_url).ok_or_else(|| {
            callback_error(
                CallbackErrorKind::MissingCode,
                "no authorization code in redirect URL",
            )
        })?;

        // A missing verifier means the redirect did not originate from
        // this attempt (other tab, cleared storage, replayed URL).
        let code_verifier = self.attempt.get_verifier().ok_or_else(|| {
            callback_error(
                CallbackErrorKind::MissingVerifier,
                "no stashed code verifier for this attempt",
            )
        })?;

        let response = self
            .exchanger
            .exchange(&self.config, &code, &code_verifier)
            .await?;

        let (id_token, access_token) = match (response.id_token, response.access_token) {
            (Some(id_token), Some(access_token)) => (id_token, access_token),
            _ => {
                return Err(callback_error(
                    CallbackErrorKind::IncompleteResponse,
                    "token response missing id_token or access_token",
                ))
            }
        };

        let tokens = SessionTokens::new(id_token, access_token);
        if !tokens.are_valid() {
            return Err(callback_error(
                CallbackErrorKind::ValidationFailed,
                "exchanged tokens are malformed or already expired",
            ));
        }

        // Commit order: persist the pair, then consume the verifier.
        self.store.set_tokens(tokens)?;
        self.attempt.remove_verifier();
        debug!("authorization code exchanged, session committed");
        Ok(())
    }
}

/// Pull the `code` query parameter out of the redirect URL.
fn extract_code(callback_url: &str) -> Option<String> {
    let url = Url::parse(callback_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
}
