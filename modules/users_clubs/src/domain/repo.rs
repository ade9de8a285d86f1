use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::User;

/// Failures surfaced by the persistence port.
///
/// `NotFound` and `Duplicate` are kept apart from generic store failures so
/// the service can categorize them without knowing anything about SQL.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("row not found")]
    NotFound,

    #[error("unique constraint violated: {0}")]
    Duplicate(String),

    #[error("failed to begin transaction")]
    Begin(#[source] anyhow::Error),

    #[error("failed to commit transaction")]
    Commit(#[source] anyhow::Error),

    #[error("{op} failed")]
    Statement {
        op: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl RepoError {
    pub fn statement(op: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Statement {
            op,
            source: source.into(),
        }
    }

    /// Full error chain on one line, for logs and internal error details.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut cur = std::error::Error::source(self);
        while let Some(e) = cur {
            out.push_str(": ");
            out.push_str(&e.to_string());
            cur = e.source();
        }
        out
    }
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// Service computes ids, timestamps and validation; the repository owns
/// transaction boundaries and the two-table/junction-table shape.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert the user row plus one fresh club and membership per entry in
    /// `user.clubs`, atomically. Returns the re-read aggregate.
    async fn add(&self, user: User) -> Result<User, RepoError>;

    /// All users with clubs attached, soft-deleted ones included.
    async fn find(&self) -> Result<Vec<User>, RepoError>;

    /// Like `find`, bounded by the window.
    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<User>, RepoError>;

    /// Avatar reference of the best row matching `nickname`.
    async fn get_img_by_nickname(&self, nickname: &str) -> Result<String, RepoError>;

    /// Active user by id; soft-deleted rows are reported as `NotFound`.
    async fn get_by_id(&self, id: Uuid) -> Result<User, RepoError>;

    /// Replace country/city/updated and the whole membership set, atomically.
    async fn update(&self, user: User) -> Result<User, RepoError>;

    /// Replace the avatar reference with a single statement.
    async fn update_img(
        &self,
        id: Uuid,
        img: &str,
        at: DateTime<Utc>,
    ) -> Result<User, RepoError>;

    /// Flip the soft-delete flag.
    async fn delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<User, RepoError>;
}
