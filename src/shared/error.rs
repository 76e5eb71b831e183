//! Client Error Types
//!
//! This module defines the error taxonomy for every remote call and local
//! validation step performed by the client.
//!
//! # Error Categories
//!
//! - `Authentication` - bad credentials or rejected registration, shown inline
//! - `Network` - transport failures and timeouts, shown as a toast
//! - `AuthorizationDenied` - role mismatch, handled by a silent redirect
//! - `Server` - any other non-success response
//! - `Decode` - response bodies that do not match the expected shape
//! - `Validation` - local input checks that fail before a request is sent
//! - `Storage` - credential file I/O
//!
//! # Usage
//!
//! ```rust
//! use remotedesk::shared::error::{ClientError, ErrorKind};
//!
//! let error = ClientError::authentication("Invalid credentials");
//! assert_eq!(error.kind(), ErrorKind::AuthenticationFailure);
//! assert_eq!(error.user_message(), "Invalid credentials");
//! ```
use thiserror::Error;

/// Errors surfaced by the API client, the session context and form validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The identity service rejected the credentials or registration
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Server-provided message, shown to the user verbatim
        message: String,
    },

    /// The request never produced a response (connect error, timeout, ...)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The caller is authenticated but lacks the required role
    #[error("Access denied: {message}")]
    AuthorizationDenied { message: String },

    /// Any other non-success HTTP status
    #[error("Request failed ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Failed to parse response: {message}")]
    Decode { message: String },

    /// Local validation error
    #[error("Validation error in field '{field}': {message}")]
    Validation { field: String, message: String },

    /// Credential store failure
    #[error("Credential storage error: {message}")]
    Storage { message: String },
}

/// Coarse classification used by the UI to decide how an error is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthenticationFailure,
    NetworkFailure,
    AuthorizationDenied,
    Other,
}

impl ClientError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn denied(message: impl Into<String>) -> Self {
        Self::AuthorizationDenied {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::AuthenticationFailure,
            Self::Network { .. } => ErrorKind::NetworkFailure,
            Self::AuthorizationDenied { .. } => ErrorKind::AuthorizationDenied,
            _ => ErrorKind::Other,
        }
    }

    /// The text shown to the user.
    ///
    /// Authentication, validation and server messages come back verbatim;
    /// everything else collapses into a generic sentence.
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication { message }
            | Self::AuthorizationDenied { message }
            | Self::Validation { message, .. }
            | Self::Server { message, .. } => message.clone(),
            Self::Network { .. } => "Unable to reach the server".to_string(),
            Self::Decode { .. } => "Unexpected response from the server".to_string(),
            Self::Storage { .. } => "Unable to access saved credentials".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // A body read that times out is still a transport failure.
        if err.is_timeout() {
            Self::network(format!("Request timed out: {}", err))
        } else if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}
