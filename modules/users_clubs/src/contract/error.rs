use std::fmt;

use thiserror::Error;

/// Machine-checkable category of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input, detected before any store access.
    BadRequest,
    /// Well-formed identifier without a matching row.
    NotFound,
    /// A uniqueness rule was violated.
    Conflict,
    /// Any store-level failure.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that are safe to expose to protocol adapters and other crates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UsersError {
    pub kind: ErrorKind,
    /// Headline, e.g. "failed to delete user".
    pub message: String,
    /// Human-readable details, safe to return to clients.
    pub details: Vec<String>,
}

impl UsersError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Vec<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message, details)
    }

    pub fn not_found(message: impl Into<String>, details: Vec<String>) -> Self {
        Self::new(ErrorKind::NotFound, message, details)
    }

    pub fn conflict(message: impl Into<String>, details: Vec<String>) -> Self {
        Self::new(ErrorKind::Conflict, message, details)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message, Vec::new())
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<crate::domain::error::DomainError> for UsersError {
    fn from(e: crate::domain::error::DomainError) -> Self {
        let kind = e.kind();
        let details = match kind {
            // Store details stay in the logs.
            ErrorKind::Internal => Vec::new(),
            _ => e.messages(),
        };
        Self::new(kind, e.headline(), details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use uuid::Uuid;

    #[test]
    fn internal_domain_errors_drop_details() {
        let err = UsersError::from(DomainError::database("find", "connection reset"));
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(err.details.is_empty());
        assert!(!err.message.contains("connection reset"));
    }

    #[test]
    fn not_found_keeps_details() {
        let id = Uuid::new_v4();
        let err = UsersError::from(DomainError::user_not_found(id));
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.details.iter().any(|d| d.contains(&id.to_string())));
    }

    #[test]
    fn kind_strings_are_stable() {
        assert_eq!(ErrorKind::BadRequest.to_string(), "bad_request");
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(ErrorKind::Conflict.to_string(), "conflict");
        assert_eq!(ErrorKind::Internal.to_string(), "internal");
    }
}
