pub mod client;
pub mod error;
pub mod model;

pub use client::UsersApi;
pub use error::{ErrorKind, UsersError};
pub use model::{Club, NewUser, User, UserUpdate};
