//! Cognito client configuration.
//!
//! Configuration is an explicit, immutable value constructed once at
//! application start and passed into the redirect builder and callback
//! processor. Nothing in this crate reads the environment ambiently.

use std::env;

use crate::error::{config_error, ConfigErrorKind, Error};

/// Environment variable holding the hosted UI domain.
pub const ENV_DOMAIN: &str = "COGNITO_DOMAIN";
/// Environment variable holding the app client id.
pub const ENV_CLIENT_ID: &str = "COGNITO_CLIENT_ID";
/// Environment variable holding the registered redirect URI.
pub const ENV_REDIRECT_URI: &str = "COGNITO_REDIRECT_URI";
/// Environment variable holding the user pool region.
pub const ENV_REGION: &str = "COGNITO_REGION";

/// Immutable configuration for a Cognito user pool app client.
#[derive(Debug, Clone)]
pub struct CognitoConfig {
    /// Hosted UI domain, e.g. `myapp.auth.us-east-1.amazoncognito.com`.
    pub domain: String,
    /// App client id of the user pool client.
    pub client_id: String,
    /// Redirect URI registered on the app client.
    pub redirect_uri: String,
    /// AWS region of the user pool, e.g. `us-east-1`. Recorded for API
    /// callers; not part of the hosted UI URLs.
    pub region: String,
}

impl CognitoConfig {
    /// Create a configuration from explicit values.
    pub fn new(
        domain: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            region: region.into(),
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// All four variables are required; a missing or empty value is a
    /// fatal configuration error, not a retryable runtime condition.
    pub fn from_env() -> Result<Self, Error> {
        let config = Self {
            domain: env::var(ENV_DOMAIN).unwrap_or_default(),
            client_id: env::var(ENV_CLIENT_ID).unwrap_or_default(),
            redirect_uri: env::var(ENV_REDIRECT_URI).unwrap_or_default(),
            region: env::var(ENV_REGION).unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every required value is present and non-empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.domain.trim().is_empty() {
            return Err(config_error(
                ConfigErrorKind::MissingDomain,
                "Cognito domain is not configured (COGNITO_DOMAIN)",
            ));
        }
        if self.client_id.trim().is_empty() {
            return Err(config_error(
                ConfigErrorKind::MissingClientId,
                "Cognito client id is not configured (COGNITO_CLIENT_ID)",
            ));
        }
        if self.redirect_uri.trim().is_empty() {
            return Err(config_error(
                ConfigErrorKind::MissingRedirectUri,
                "Cognito redirect URI is not configured (COGNITO_REDIRECT_URI)",
            ));
        }
        if self.region.trim().is_empty() {
            return Err(config_error(
                ConfigErrorKind::MissingRegion,
                "Cognito region is not configured (COGNITO_REGION)",
            ));
        }
        Ok(())
    }

    /// Base URL of the hosted UI.
    ///
    /// A domain that already carries a scheme is used verbatim; a bare
    /// host gets `https://`.
    fn base_url(&self) -> String {
        let domain = self.domain.trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        }
    }

    /// Hosted UI login endpoint.
    pub fn login_endpoint(&self) -> String {
        format!("{}/login", self.base_url())
    }

    /// Token exchange endpoint.
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.base_url())
    }
}
