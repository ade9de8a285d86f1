#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use users_clubs::{
    api::rpc::{users_grpc_service, UsersRpc, UsersServer},
    contract::{client::UsersApi, model::NewUser},
    domain::service::{Service, ServiceConfig},
    gateways::local::UsersLocalClient,
    infra::storage::{migrations::Migrator, SeaOrmUsersRepository},
};

/// Create a fresh test database for each test (in-memory SQLite) and run migrations.
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Build the domain Service with a SeaORM-backed repository.
pub async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    let repo = SeaOrmUsersRepository::new(db);
    Arc::new(Service::new(Arc::new(repo), ServiceConfig::default()))
}

/// Build a local in-process client on top of the Service.
pub async fn create_test_client() -> Arc<dyn UsersApi> {
    let service = create_test_service().await;
    Arc::new(UsersLocalClient::new(service))
}

/// REST routes over a fresh client.
pub async fn create_test_router() -> Router {
    let api = create_test_client().await;
    users_clubs::api::rest::routes::register_routes(Router::new(), api)
}

/// gRPC handler and the tonic service wrapping it, over one shared client.
pub async fn create_test_rpc() -> (UsersRpc, UsersServer<UsersRpc>) {
    let api = create_test_client().await;
    (UsersRpc::new(api.clone()), users_grpc_service(api))
}

pub fn new_user(nickname: &str, clubs: &[&str]) -> NewUser {
    NewUser {
        nickname: nickname.to_string(),
        img: format!("{nickname}.png"),
        country: "Poland".to_string(),
        city: "Warsaw".to_string(),
        clubs: clubs.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn sorted<'a>(mut names: Vec<&'a str>) -> Vec<&'a str> {
    names.sort_unstable();
    names
}
