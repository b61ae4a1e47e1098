//! # cognito-auth
//!
//! Client-side OAuth 2.0 authorization code flow with PKCE against an
//! AWS Cognito hosted UI, plus local session-token management:
//! - PKCE verifier/challenge generation
//! - hosted UI login URL construction
//! - callback processing and authorization code exchange
//! - durable session-token storage and freshness checks
//! - a query facade for presentation code
//!
//! ## Architecture
//!
//! The crate is the protocol and security core; login buttons, route
//! guards, and navigation live in the hosting application and only call
//! the facade surface below.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cognito_auth::{
//!     config::CognitoConfig,
//!     oauth::{build_login_url, CallbackProcessor, MemoryAttemptStorage},
//!     session::Session,
//!     token::FileSessionStore,
//! };
//!
//! let config = CognitoConfig::from_env()?;
//! let attempt = MemoryAttemptStorage::new();
//! let store = FileSessionStore::new(session_path);
//!
//! // Login initiation: send the user here.
//! let login_url = build_login_url(&config, &attempt)?;
//!
//! // On redirect return:
//! let processor = CallbackProcessor::new(config, attempt, store.clone());
//! let logged_in = processor.handle_callback(&callback_url).await;
//!
//! // Anywhere in the app:
//! let session = Session::new(store);
//! if session.is_authenticated() { /* ... */ }
//! ```

pub mod config;
pub mod error;
pub mod oauth;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
