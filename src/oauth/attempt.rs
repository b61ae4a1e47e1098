//! Volatile per-attempt storage for the PKCE code verifier.
//!
//! The redirect builder stashes the verifier here before handing the
//! login URL to the caller; the callback processor consumes it when the
//! provider redirects back. Writes are synchronous, so the verifier is
//! durably visible before any navigation happens.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fixed key under which the verifier is stashed.
pub const CODE_VERIFIER_KEY: &str = "cognito_code_verifier";

/// Volatile storage scoped to a single login attempt.
///
/// An abandoned attempt leaves a stale verifier behind; the next attempt
/// overwrites it. Implementations hold nothing across process restarts.
pub trait AttemptStorage: Send + Sync {
    /// Stash the verifier, replacing any value from a prior attempt.
    fn put_verifier(&self, verifier: &str);

    /// Read the stashed verifier without consuming it.
    fn get_verifier(&self) -> Option<String>;

    /// Remove the stashed verifier. Idempotent.
    fn remove_verifier(&self);
}

/// In-memory attempt storage.
#[derive(Clone, Default)]
pub struct MemoryAttemptStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryAttemptStorage {
    /// Create an empty attempt store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttemptStorage for MemoryAttemptStorage {
    fn put_verifier(&self, verifier: &str) {
        let mut values = self.values.lock().unwrap();
        values.insert(CODE_VERIFIER_KEY.to_string(), verifier.to_string());
    }

    fn get_verifier(&self) -> Option<String> {
        let values = self.values.lock().unwrap();
        values.get(CODE_VERIFIER_KEY).cloned()
    }

    fn remove_verifier(&self) {
        let mut values = self.values.lock().unwrap();
        values.remove(CODE_VERIFIER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let storage = MemoryAttemptStorage::new();
        assert!(storage.get_verifier().is_none());

        storage.put_verifier("verifier-1");
        assert_eq!(storage.get_verifier().as_deref(), Some("verifier-1"));
    }

    #[test]
    fn test_put_overwrites_stale_verifier() {
        let storage = MemoryAttemptStorage::new();
        storage.put_verifier("stale");
        storage.put_verifier("fresh");
        assert_eq!(storage.get_verifier().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let storage = MemoryAttemptStorage::new();
        storage.put_verifier("verifier-1");
        storage.remove_verifier();
        storage.remove_verifier();
        assert!(storage.get_verifier().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let storage = MemoryAttemptStorage::new();
        let view = storage.clone();
        storage.put_verifier("shared");
        assert_eq!(view.get_verifier().as_deref(), Some("shared"));
    }
}
