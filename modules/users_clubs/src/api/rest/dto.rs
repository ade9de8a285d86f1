use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::contract::model::{Club, NewUser, User};

/// REST DTO for user representation with serde/utoipa
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub nickname: String,
    pub img: String,
    pub country: String,
    pub city: String,
    pub clubs: Vec<ClubDto>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClubDto {
    pub id: Uuid,
    pub name: String,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserReq {
    pub nickname: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    /// Club names; every name creates a new club.
    #[serde(default)]
    pub clubs: Vec<String>,
}

/// REST DTO for replacing profile fields and memberships
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateUserReq {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub clubs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateImgReq {
    pub img: Option<String>,
}

/// REST DTO for user list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvatarDto {
    pub nickname: String,
    pub img: String,
}

/// Acknowledgement body for writes without a payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raw query parameters; parsing and fallbacks are applied by the service.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Page size; non-positive or non-numeric values fall back to the default.
    pub limit: Option<String>,
    /// Rows to skip; negative or non-numeric values fall back to 0.
    pub offset: Option<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname,
            img: user.img,
            country: user.country,
            city: user.city,
            clubs: user.clubs.into_iter().map(ClubDto::from).collect(),
            created: user.created,
            updated: user.updated,
            deleted: user.deleted,
        }
    }
}

impl From<Club> for ClubDto {
    fn from(club: Club) -> Self {
        Self {
            id: club.id,
            name: club.name,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            nickname: req.nickname,
            img: req.img,
            country: req.country,
            city: req.city,
            clubs: req.clubs,
        }
    }
}

impl From<Vec<User>> for UserListDto {
    fn from(users: Vec<User>) -> Self {
        let users: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
        Self {
            total: users.len(),
            users,
        }
    }
}
