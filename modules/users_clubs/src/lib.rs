// === PUBLIC CONTRACT ===
// Only the contract module should be public for other crates to consume
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model};

pub mod config;
pub use config::UsersClubsConfig;

// === INTERNAL MODULES ===
// Exposed for wiring in the server binary and for integration tests.
// Adapters and storage are implementation details; consumers should go through `contract`.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
