//! Session query facade consumed by presentation code.

use secrecy::ExposeSecret;
use tracing::debug;

use crate::error::Error;
use crate::token::{claims, IdTokenClaims, SessionStore};

/// Read-side view of the stored session, plus logout.
///
/// Holds a handle to the same store the callback processor commits to.
/// Protected views query it freely; the store is the single shared
/// resource and last-write-wins is accepted.
pub struct Session<S> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    /// Create a facade over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// True when a stored identity token exists and is unexpired.
    pub fn is_authenticated(&self) -> bool {
        let id_token = self.store.get_id_token();
        claims::is_token_valid(id_token.as_ref().map(|token| token.expose_secret().as_str()))
    }

    /// Decoded claims of the stored identity token, if any.
    ///
    /// No signature check happens here: treat the result as display data
    /// asserted by the provider, not as an authorization decision.
    pub fn current_user(&self) -> Option<IdTokenClaims> {
        let id_token = self.store.get_id_token()?;
        claims::decode_claims(id_token.expose_secret())
    }

    /// Clear the stored token pair.
    ///
    /// Local only: the provider's hosted session is not contacted, so a
    /// later login may not prompt for credentials again.
    pub fn logout(&self) -> Result<(), Error> {
        debug!("clearing stored session tokens");
        self.store.clear_tokens()
    }
}
