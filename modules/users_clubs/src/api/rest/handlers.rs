use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info};
use utoipa::OpenApi;

use crate::api::problem::{Problem, ProblemResponse};
use crate::api::rest::dto::{
    AvatarDto, CreateUserReq, ListUsersQuery, MessageDto, UpdateImgReq, UpdateUserReq, UserDto,
    UserListDto,
};
use crate::api::rest::error::{bad_body, map_users_error};
use crate::api::rest::openapi::ApiDoc;
use crate::contract::client::UsersApi;
use crate::contract::error::UsersError;
use crate::contract::model::UserUpdate;
use crate::domain::service::parse_user_id;

type Api = Extension<Arc<dyn UsersApi>>;

fn parse_id(raw: &str, instance: &str) -> Result<uuid::Uuid, ProblemResponse> {
    parse_user_id(raw).map_err(|e| map_users_error(&UsersError::from(e), instance))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users/add",
    tag = "users",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 409, description = "Conflict", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn add_user(
    uri: Uri,
    Extension(api): Api,
    payload: Result<Json<CreateUserReq>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), ProblemResponse> {
    let Json(req_body) = payload.map_err(|e| bad_body(e.body_text(), uri.path()))?;
    info!("Creating user: {:?}", req_body);

    match api.add(req_body.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_users_error(&e, uri.path()))
        }
    }
}

/// Replace country, city and clubs of a user
#[utoipa::path(
    put,
    path = "/api/v1/users/edit/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User UUID")),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "User updated", body = MessageDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn update_user(
    uri: Uri,
    Extension(api): Api,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserReq>, JsonRejection>,
) -> Result<Json<MessageDto>, ProblemResponse> {
    let id = parse_id(&user_id, uri.path())?;
    let Json(req_body) = payload.map_err(|e| bad_body(e.body_text(), uri.path()))?;
    info!("Updating user {} with: {:?}", id, req_body);

    let update = UserUpdate {
        id,
        country: req_body.country,
        city: req_body.city,
        clubs: req_body.clubs,
    };

    match api.update(update).await {
        Ok(()) => Ok(Json(MessageDto::new("user updated successfully"))),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            Err(map_users_error(&e, uri.path()))
        }
    }
}

/// Replace the avatar reference of a user
#[utoipa::path(
    put,
    path = "/api/v1/users/edit-img/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User UUID")),
    request_body = UpdateImgReq,
    responses(
        (status = 200, description = "Image updated", body = MessageDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn update_user_img(
    uri: Uri,
    Extension(api): Api,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateImgReq>, JsonRejection>,
) -> Result<Json<MessageDto>, ProblemResponse> {
    let id = parse_id(&user_id, uri.path())?;
    let Json(req_body) = payload.map_err(|e| bad_body(e.body_text(), uri.path()))?;
    let img = match req_body.img {
        Some(img) if !img.trim().is_empty() => img,
        _ => return Err(bad_body("img is required", uri.path())),
    };
    info!("Updating image of user {}", id);

    match api.update_img(id, img).await {
        Ok(()) => Ok(Json(MessageDto::new("user image updated successfully"))),
        Err(e) => {
            error!("Failed to update image of user {}: {}", id, e);
            Err(map_users_error(&e, uri.path()))
        }
    }
}

/// Soft-delete a user by ID
#[utoipa::path(
    delete,
    path = "/api/v1/users/delete/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User deleted", body = MessageDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn delete_user(
    uri: Uri,
    Extension(api): Api,
    Path(user_id): Path<String>,
) -> Result<Json<MessageDto>, ProblemResponse> {
    info!("Deleting user: {}", user_id);

    // The service owns id validation for deletes.
    match api.delete(&user_id).await {
        Ok(()) => Ok(Json(MessageDto::new("user deleted successfully"))),
        Err(e) => {
            error!("Failed to delete user {}: {}", user_id, e);
            Err(map_users_error(&e, uri.path()))
        }
    }
}

/// Get an active user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/get/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn get_user(
    uri: Uri,
    Extension(api): Api,
    Path(user_id): Path<String>,
) -> Result<Json<UserDto>, ProblemResponse> {
    let id = parse_id(&user_id, uri.path())?;
    info!("Getting user with id: {}", id);

    match api.get_by_id(id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_users_error(&e, uri.path()))
        }
    }
}

/// Get the avatar reference for a nickname
#[utoipa::path(
    get,
    path = "/api/v1/users/get-avatar/{nickname}",
    tag = "users",
    params(("nickname" = String, Path, description = "User nickname")),
    responses(
        (status = 200, description = "Avatar found", body = AvatarDto),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn get_avatar(
    uri: Uri,
    Extension(api): Api,
    Path(nickname): Path<String>,
) -> Result<Json<AvatarDto>, ProblemResponse> {
    info!("Getting avatar of: {}", nickname);

    match api.get_avatar_by_nickname(&nickname).await {
        Ok(img) => Ok(Json(AvatarDto { nickname, img })),
        Err(e) => {
            error!("Failed to get avatar of {}: {}", nickname, e);
            Err(map_users_error(&e, uri.path()))
        }
    }
}

/// All users, soft-deleted included
#[utoipa::path(
    get,
    path = "/api/v1/users/find",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = UserListDto),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn find_users(
    uri: Uri,
    Extension(api): Api,
) -> Result<Json<UserListDto>, ProblemResponse> {
    info!("Finding all users");

    match api.find().await {
        Ok(users) => Ok(Json(UserListDto::from(users))),
        Err(e) => {
            error!("Failed to find users: {}", e);
            Err(map_users_error(&e, uri.path()))
        }
    }
}

/// Paged list of users
#[utoipa::path(
    get,
    path = "/api/v1/users/list",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users", body = UserListDto),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn list_users(
    uri: Uri,
    Extension(api): Api,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListDto>, ProblemResponse> {
    info!("Listing users with query: {:?}", query);

    match api
        .list(query.limit.as_deref(), query.offset.as_deref())
        .await
    {
        Ok(users) => Ok(Json(UserListDto::from(users))),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_users_error(&e, uri.path()))
        }
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
