use crate::contract::model::{Club, User};
use crate::infra::storage::entity::{club, user};

/// Convert a user row plus its club rows into the domain aggregate.
pub fn to_domain(row: user::Model, clubs: Vec<club::Model>) -> User {
    User {
        id: row.id,
        nickname: row.nickname,
        img: from_nullable(row.img),
        country: from_nullable(row.country),
        city: from_nullable(row.city),
        clubs: clubs.into_iter().map(club_to_domain).collect(),
        created: row.created_at,
        updated: row.updated_at,
        deleted: row.deleted,
    }
}

pub fn club_to_domain(row: club::Model) -> Club {
    Club {
        id: row.id,
        name: row.name,
    }
}

/// Empty strings are persisted as SQL NULL.
pub fn to_nullable(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_owned())
    }
}

pub fn from_nullable(s: Option<String>) -> String {
    s.unwrap_or_default()
}
