use tonic::{Code, Status};

use crate::contract::error::{ErrorKind, UsersError};

/// Canonical gRPC code for a contract error kind.
pub fn code_for(kind: ErrorKind) -> Code {
    match kind {
        ErrorKind::BadRequest => Code::InvalidArgument,
        ErrorKind::NotFound => Code::NotFound,
        ErrorKind::Conflict => Code::AlreadyExists,
        ErrorKind::Internal => Code::Internal,
    }
}

impl From<UsersError> for Status {
    fn from(e: UsersError) -> Self {
        let code = code_for(e.kind());
        if code == Code::Internal {
            tracing::error!(error = ?e, "Internal error occurred");
        }
        let message = if e.details.is_empty() {
            e.message
        } else {
            format!("{}: {}", e.message, e.details.join("; "))
        };
        Status::new(code, message)
    }
}
