//! Error types for the `cognito-auth` crate.
//!
//! A root Error struct holds an error kind plus an optional source for
//! error chaining, so callers can match on the failure category without
//! parsing strings.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for the crate.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Config(ConfigErrorKind),
    Callback(CallbackErrorKind),
    Storage(StorageErrorKind),
    Http(HttpErrorKind),
}

/// Errors from client configuration.
///
/// All of these are startup faults: the caller should surface them and
/// stop, not retry.
#[derive(Debug, PartialEq)]
pub enum ConfigErrorKind {
    MissingDomain,
    MissingClientId,
    MissingRedirectUri,
    MissingRegion,
    InvalidDomain,
}

/// Errors from processing the provider redirect.
///
/// These all collapse to a single boolean failure at the facade; the
/// kinds exist for logging and tests.
#[derive(Debug, PartialEq)]
pub enum CallbackErrorKind {
    MissingCode,
    MissingVerifier,
    ExchangeFailed,
    IncompleteResponse,
    ValidationFailed,
}

/// Errors from session storage operations.
#[derive(Debug, PartialEq)]
pub enum StorageErrorKind {
    ReadFailed,
    WriteFailed,
}

/// Errors from HTTP client operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    Network,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Config(kind) => write!(f, "Configuration error: {:?}", kind),
            ErrorKind::Callback(kind) => write!(f, "Callback error: {:?}", kind),
            ErrorKind::Storage(kind) => write!(f, "Storage error: {:?}", kind),
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_request() {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

/// Helper function to create configuration errors.
pub fn config_error(kind: ConfigErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Config(kind),
    }
}

/// Helper function to create callback errors.
pub fn callback_error(kind: CallbackErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Callback(kind),
    }
}

