//! SeaORM entities for `users`, `clubs` and the `user_clubs` junction table.

pub mod club;
pub mod user;
pub mod user_club;
