//! Token decoding, validity checks, and session storage.

pub mod claims;
mod storage;
mod tokens;

pub use claims::{decode_claims, is_token_valid, IdTokenClaims};
pub use storage::{FileSessionStore, MemorySessionStore, SessionStore};
pub use tokens::SessionTokens;
