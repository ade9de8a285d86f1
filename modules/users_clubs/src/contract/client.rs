use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::error::UsersError;
use crate::contract::model::{NewUser, User, UserUpdate};

/// Protocol-agnostic API consumed by the REST and RPC adapters.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Create a user together with its initial club memberships.
    async fn add(&self, new_user: NewUser) -> Result<User, UsersError>;

    /// Replace country, city and the full membership set.
    async fn update(&self, update: UserUpdate) -> Result<(), UsersError>;

    /// Replace the avatar reference only.
    async fn update_img(&self, id: Uuid, img: String) -> Result<(), UsersError>;

    /// Soft-delete by id in string form; malformed ids are rejected.
    async fn delete(&self, id: &str) -> Result<(), UsersError>;

    /// Get an active user by id.
    async fn get_by_id(&self, id: Uuid) -> Result<User, UsersError>;

    async fn get_avatar_by_nickname(&self, nickname: &str) -> Result<String, UsersError>;

    /// All users, soft-deleted included.
    async fn find(&self) -> Result<Vec<User>, UsersError>;

    /// Windowed listing; invalid or missing values fall back to defaults.
    async fn list(
        &self,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Vec<User>, UsersError>;
}
