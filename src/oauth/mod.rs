//! OAuth 2.0 authorization code flow with PKCE against the hosted UI.

mod attempt;
mod authorize;
mod callback;
mod pkce;

pub use attempt::{AttemptStorage, MemoryAttemptStorage, CODE_VERIFIER_KEY};
pub use authorize::{build_login_url, SCOPES};
pub use callback::{CallbackProcessor, HttpTokenExchange, TokenExchange, TokenResponse};
pub use pkce::{CodeChallenge, CodeVerifier};
