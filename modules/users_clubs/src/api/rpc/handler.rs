use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tonic::{Request, Response, Status};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rpc::proto::{
    self, users_server::Users, AddUserRequest, AddUserResponse, DeleteUserRequest,
    DeleteUserResponse, FindUsersRequest, FindUsersResponse, GetAvatarByNicknameRequest,
    GetAvatarByNicknameResponse, GetByIdRequest, GetByIdResponse, ListUsersRequest,
    ListUsersResponse, UpdateImgRequest, UpdateImgResponse, UpdateUserRequest,
    UpdateUserResponse,
};
use crate::contract::client::UsersApi;
use crate::contract::error::UsersError;
use crate::contract::model::{NewUser, User, UserUpdate};
use crate::domain::service::parse_user_id;

/// gRPC adapter over the users contract.
#[derive(Clone)]
pub struct UsersRpc {
    api: Arc<dyn UsersApi>,
}

impl UsersRpc {
    pub fn new(api: Arc<dyn UsersApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Users for UsersRpc {
    async fn add(
        &self,
        request: Request<AddUserRequest>,
    ) -> Result<Response<AddUserResponse>, Status> {
        info!(method = "Add", "gRPC call");
        let req = request.into_inner();
        let user = self
            .api
            .add(NewUser {
                nickname: req.nickname,
                img: req.img,
                country: req.country,
                city: req.city,
                clubs: req.clubs,
            })
            .await
            .map_err(|e| failed("Add", e))?;
        Ok(Response::new(AddUserResponse {
            user: Some(to_proto_user(user)),
        }))
    }

    async fn update(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        info!(method = "Update", "gRPC call");
        let req = request.into_inner();
        let id = parse_id("Update", &req.user_id)?;
        self.api
            .update(UserUpdate {
                id,
                country: req.country,
                city: req.city,
                clubs: req.clubs,
            })
            .await
            .map_err(|e| failed("Update", e))?;
        Ok(Response::new(UpdateUserResponse {}))
    }

    async fn update_img(
        &self,
        request: Request<UpdateImgRequest>,
    ) -> Result<Response<UpdateImgResponse>, Status> {
        info!(method = "UpdateImg", "gRPC call");
        let req = request.into_inner();
        let id = parse_id("UpdateImg", &req.user_id)?;
        self.api
            .update_img(id, req.img)
            .await
            .map_err(|e| failed("UpdateImg", e))?;
        Ok(Response::new(UpdateImgResponse {}))
    }

    async fn delete(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        info!(method = "Delete", "gRPC call");
        let req = request.into_inner();
        self.api
            .delete(&req.user_id)
            .await
            .map_err(|e| failed("Delete", e))?;
        Ok(Response::new(DeleteUserResponse {}))
    }

    async fn get_by_id(
        &self,
        request: Request<GetByIdRequest>,
    ) -> Result<Response<GetByIdResponse>, Status> {
        info!(method = "GetById", "gRPC call");
        let req = request.into_inner();
        let id = parse_id("GetById", &req.user_id)?;
        let user = self
            .api
            .get_by_id(id)
            .await
            .map_err(|e| failed("GetById", e))?;
        Ok(Response::new(GetByIdResponse {
            user: Some(to_proto_user(user)),
        }))
    }

    async fn get_avatar_by_nickname(
        &self,
        request: Request<GetAvatarByNicknameRequest>,
    ) -> Result<Response<GetAvatarByNicknameResponse>, Status> {
        info!(method = "GetAvatarByNickname", "gRPC call");
        let req = request.into_inner();
        let avatar = self
            .api
            .get_avatar_by_nickname(&req.nickname)
            .await
            .map_err(|e| failed("GetAvatarByNickname", e))?;
        Ok(Response::new(GetAvatarByNicknameResponse { avatar }))
    }

    async fn find(
        &self,
        _request: Request<FindUsersRequest>,
    ) -> Result<Response<FindUsersResponse>, Status> {
        info!(method = "Find", "gRPC call");
        let users = self.api.find().await.map_err(|e| failed("Find", e))?;
        Ok(Response::new(FindUsersResponse {
            users: users.into_iter().map(to_proto_user).collect(),
        }))
    }

    async fn list(
        &self,
        request: Request<ListUsersRequest>,
    ) -> Result<Response<ListUsersResponse>, Status> {
        info!(method = "List", "gRPC call");
        let req = request.into_inner();
        // Non-positive values fall back to the defaults in the service.
        let limit = req.limit.to_string();
        let offset = req.offset.to_string();
        let users = self
            .api
            .list(Some(&limit), Some(&offset))
            .await
            .map_err(|e| failed("List", e))?;
        Ok(Response::new(ListUsersResponse {
            users: users.into_iter().map(to_proto_user).collect(),
        }))
    }
}

fn failed(method: &'static str, e: UsersError) -> Status {
    let status = Status::from(e);
    error!(method, code = ?status.code(), error = %status.message(), "gRPC call failed");
    status
}

fn parse_id(method: &'static str, raw: &str) -> Result<Uuid, Status> {
    parse_user_id(raw).map_err(|e| failed(method, UsersError::from(e)))
}

fn to_timestamp(at: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    }
}

pub fn to_proto_user(user: User) -> proto::User {
    proto::User {
        id: user.id.to_string(),
        nickname: user.nickname,
        img: user.img,
        country: user.country,
        city: user.city,
        clubs: user
            .clubs
            .into_iter()
            .map(|c| proto::Club {
                id: c.id.to_string(),
                name: c.name,
            })
            .collect(),
        created: Some(to_timestamp(user.created)),
        updated: Some(to_timestamp(user.updated)),
        deleted: user.deleted,
    }
}
