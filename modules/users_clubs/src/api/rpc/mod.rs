//! gRPC surface: the `users.v1.Users` service on tonic.
//!
//! Messages and wire contract live in `proto/users/v1/users.proto`.

use std::sync::Arc;

use crate::contract::client::UsersApi;

pub mod handler;
pub mod proto;
pub mod status;

pub use handler::UsersRpc;
pub use proto::users_server::{Users, UsersServer, SERVICE_NAME};

/// Tonic service ready to be added to a `tonic::transport::Server`.
pub fn users_grpc_service(api: Arc<dyn UsersApi>) -> UsersServer<UsersRpc> {
    UsersServer::new(UsersRpc::new(api))
}
