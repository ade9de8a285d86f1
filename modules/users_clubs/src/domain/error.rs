use thiserror::Error;
use uuid::Uuid;

use crate::contract::error::ErrorKind;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User id is required")]
    MissingUserId,

    #[error("Invalid user id '{raw}': {reason}")]
    InvalidUserId { raw: String, reason: String },

    #[error("Nickname cannot be empty")]
    EmptyNickname,

    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("No user with nickname '{nickname}'")]
    NicknameNotFound { nickname: String },

    #[error("Nickname '{nickname}' is already taken")]
    NicknameTaken { nickname: String },

    #[error("Database error during {op}: {message}")]
    Database { op: &'static str, message: String },
}

impl DomainError {
    pub fn missing_user_id() -> Self {
        Self::MissingUserId
    }

    pub fn invalid_user_id(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUserId {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    pub fn empty_nickname() -> Self {
        Self::EmptyNickname
    }

    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn nickname_not_found(nickname: impl Into<String>) -> Self {
        Self::NicknameNotFound {
            nickname: nickname.into(),
        }
    }

    pub fn nickname_taken(nickname: impl Into<String>) -> Self {
        Self::NicknameTaken {
            nickname: nickname.into(),
        }
    }

    pub fn database(op: &'static str, message: impl Into<String>) -> Self {
        Self::Database {
            op,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingUserId | Self::InvalidUserId { .. } | Self::EmptyNickname => {
                ErrorKind::BadRequest
            }
            Self::UserNotFound { .. } | Self::NicknameNotFound { .. } => ErrorKind::NotFound,
            Self::NicknameTaken { .. } => ErrorKind::Conflict,
            Self::Database { .. } => ErrorKind::Internal,
        }
    }

    /// Short summary shown to clients.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::MissingUserId | Self::InvalidUserId { .. } => "invalid user id",
            Self::EmptyNickname => "invalid user data",
            Self::UserNotFound { .. } => "user not found",
            Self::NicknameNotFound { .. } => "avatar not found",
            Self::NicknameTaken { .. } => "nickname already in use",
            Self::Database { .. } => "internal error",
        }
    }

    /// Detail lines; the store error text is included only for `Database`.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::MissingUserId => vec!["user id is required".to_string()],
            Self::InvalidUserId { reason, .. } => {
                vec!["invalid uuid format".to_string(), reason.clone()]
            }
            Self::EmptyNickname => vec!["nickname is required".to_string()],
            Self::UserNotFound { id } => vec![format!("user {id} not found or deleted")],
            Self::NicknameNotFound { nickname } => {
                vec![format!("no user with nickname '{nickname}'")]
            }
            Self::NicknameTaken { nickname } => {
                vec![format!("nickname '{nickname}' is already taken")]
            }
            Self::Database { op, message } => vec![format!("{op}: {message}")],
        }
    }
}
