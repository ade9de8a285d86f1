use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User aggregate: profile fields plus the resolved club memberships.
///
/// Optional text fields (`img`, `country`, `city`) use the empty string for
/// "not set"; storage maps them to SQL NULL and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub nickname: String,
    pub img: String,
    pub country: String,
    pub city: String,
    pub clubs: Vec<Club>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub id: Uuid,
    pub name: String,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub nickname: String,
    pub img: String,
    pub country: String,
    pub city: String,
    /// Club names; each one becomes a brand new club row.
    pub clubs: Vec<String>,
}

/// Replacement of the mutable profile fields and the full membership set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: Uuid,
    pub country: String,
    pub city: String,
    pub clubs: Vec<String>,
}

impl User {
    /// Club names in storage order.
    pub fn club_names(&self) -> Vec<&str> {
        self.clubs.iter().map(|c| c.name.as_str()).collect()
    }
}
