use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::contract::client::UsersApi;

/// Mount the `/api/v1/users` routes, the health check and the OpenAPI document.
pub fn register_routes(router: Router, api: Arc<dyn UsersApi>) -> Router {
    router
        .route("/api/v1/users/add", post(handlers::add_user))
        .route("/api/v1/users/edit/{user_id}", put(handlers::update_user))
        .route(
            "/api/v1/users/edit-img/{user_id}",
            put(handlers::update_user_img),
        )
        .route(
            "/api/v1/users/delete/{user_id}",
            delete(handlers::delete_user),
        )
        .route("/api/v1/users/get/{user_id}", get(handlers::get_user))
        .route(
            "/api/v1/users/get-avatar/{nickname}",
            get(handlers::get_avatar),
        )
        .route("/api/v1/users/find", get(handlers::find_users))
        .route("/api/v1/users/list", get(handlers::list_users))
        .route("/api/v1/openapi.json", get(handlers::openapi_json))
        .route("/health", get(handlers::health))
        .layer(Extension(api))
}
