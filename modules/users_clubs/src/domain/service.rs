use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::config::UsersClubsConfig;
use crate::contract::model::{Club, NewUser, User, UserUpdate};
use crate::domain::error::DomainError;
use crate::domain::repo::{RepoError, UsersRepository};

/// Domain service with the use cases for users and their clubs.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&UsersClubsConfig::default())
    }
}

impl From<&UsersClubsConfig> for ServiceConfig {
    fn from(cfg: &UsersClubsConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
        }
    }
}

/// Parse a caller-supplied user id.
///
/// Empty input and malformed UUIDs are both bad requests.
pub fn parse_user_id(raw: &str) -> Result<Uuid, DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::missing_user_id());
    }
    Uuid::parse_str(raw).map_err(|e| DomainError::invalid_user_id(raw, e.to_string()))
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(
        name = "users_clubs.service.add",
        skip(self, new_user),
        fields(nickname = %new_user.nickname, clubs = new_user.clubs.len())
    )]
    pub async fn add(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        if new_user.nickname.trim().is_empty() {
            return Err(DomainError::empty_nickname());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            nickname: new_user.nickname,
            img: new_user.img,
            country: new_user.country,
            city: new_user.city,
            clubs: fresh_clubs(new_user.clubs),
            created: now,
            updated: now,
            deleted: false,
        };
        let nickname = user.nickname.clone();

        let stored = self.repo.add(user).await.map_err(|e| match e {
            RepoError::Duplicate(_) => DomainError::nickname_taken(nickname),
            other => internal("add", other),
        })?;

        info!("Successfully created user with id={}", stored.id);
        Ok(stored)
    }

    #[instrument(
        name = "users_clubs.service.update",
        skip(self, update),
        fields(user_id = %update.id, clubs = update.clubs.len())
    )]
    pub async fn update(&self, update: UserUpdate) -> Result<(), DomainError> {
        info!("Updating user");

        let id = update.id;
        let now = Utc::now();
        // The repository reads only id, country, city, clubs and updated.
        let user = User {
            id,
            nickname: String::new(),
            img: String::new(),
            country: update.country,
            city: update.city,
            clubs: fresh_clubs(update.clubs),
            created: now,
            updated: now,
            deleted: false,
        };

        self.repo
            .update(user)
            .await
            .map_err(|e| not_found_or_internal("update", e, id))?;

        info!("Successfully updated user");
        Ok(())
    }

    #[instrument(name = "users_clubs.service.update_img", skip(self, img), fields(user_id = %id))]
    pub async fn update_img(&self, id: Uuid, img: String) -> Result<(), DomainError> {
        info!("Updating user image");

        self.repo
            .update_img(id, &img, Utc::now())
            .await
            .map_err(|e| not_found_or_internal("update_img", e, id))?;

        info!("Successfully updated user image");
        Ok(())
    }

    #[instrument(name = "users_clubs.service.delete", skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting user");

        let id = parse_user_id(id)?;
        self.repo
            .delete(id, Utc::now())
            .await
            .map_err(|e| not_found_or_internal("delete", e, id))?;

        info!("Successfully soft-deleted user {}", id);
        Ok(())
    }

    #[instrument(name = "users_clubs.service.get_by_id", skip(self), fields(user_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");

        let user = self
            .repo
            .get_by_id(id)
            .await
            .map_err(|e| not_found_or_internal("get_by_id", e, id))?;

        debug!("Successfully retrieved user");
        Ok(user)
    }

    #[instrument(name = "users_clubs.service.get_avatar_by_nickname", skip(self))]
    pub async fn get_avatar_by_nickname(&self, nickname: &str) -> Result<String, DomainError> {
        debug!("Getting avatar by nickname");

        self.repo
            .get_img_by_nickname(nickname)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::nickname_not_found(nickname),
                other => internal("get_avatar_by_nickname", other),
            })
    }

    #[instrument(name = "users_clubs.service.find", skip(self))]
    pub async fn find(&self) -> Result<Vec<User>, DomainError> {
        debug!("Finding all users");

        let users = self.repo.find().await.map_err(|e| internal("find", e))?;

        debug!("Found {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "users_clubs.service.list", skip(self))]
    pub async fn list(
        &self,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Vec<User>, DomainError> {
        let (limit, offset) = self.resolve_window(limit, offset);
        debug!(limit, offset, "Listing users");

        let users = self
            .repo
            .list(limit, offset)
            .await
            .map_err(|e| internal("list", e))?;

        debug!("Listed {} users", users.len());
        Ok(users)
    }

    /// Apply the list window policy.
    ///
    /// A limit is accepted if it parses as a positive integer (no upper
    /// bound) and an offset if it parses as a non-negative one; anything
    /// else falls back to the default without an error.
    pub fn resolve_window(&self, limit: Option<&str>, offset: Option<&str>) -> (u64, u64) {
        let limit = limit
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|l| *l > 0)
            .map(|l| l as u64)
            .unwrap_or(self.config.default_page_size);
        let offset = offset
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|o| *o >= 0)
            .map(|o| o as u64)
            .unwrap_or(0);
        (limit, offset)
    }
}

fn fresh_clubs(names: Vec<String>) -> Vec<Club> {
    names
        .into_iter()
        .map(|name| Club {
            id: Uuid::new_v4(),
            name,
        })
        .collect()
}

fn internal(op: &'static str, e: RepoError) -> DomainError {
    let message = e.chain();
    error!(op, error = %message, "Repository call failed");
    DomainError::database(op, message)
}

fn not_found_or_internal(op: &'static str, e: RepoError, id: Uuid) -> DomainError {
    match e {
        RepoError::NotFound => DomainError::user_not_found(id),
        other => internal(op, other),
    }
}
