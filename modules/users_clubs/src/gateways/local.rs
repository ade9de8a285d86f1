use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::UsersApi,
    error::UsersError,
    model::{NewUser, User, UserUpdate},
};
use crate::domain::service::Service;

/// Local implementation of the UsersApi trait that delegates to the domain service
pub struct UsersLocalClient {
    service: Arc<Service>,
}

impl UsersLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersApi for UsersLocalClient {
    async fn add(&self, new_user: NewUser) -> Result<User, UsersError> {
        self.service.add(new_user).await.map_err(Into::into)
    }

    async fn update(&self, update: UserUpdate) -> Result<(), UsersError> {
        self.service.update(update).await.map_err(Into::into)
    }

    async fn update_img(&self, id: Uuid, img: String) -> Result<(), UsersError> {
        self.service.update_img(id, img).await.map_err(Into::into)
    }

    async fn delete(&self, id: &str) -> Result<(), UsersError> {
        self.service.delete(id).await.map_err(Into::into)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, UsersError> {
        self.service.get_by_id(id).await.map_err(Into::into)
    }

    async fn get_avatar_by_nickname(&self, nickname: &str) -> Result<String, UsersError> {
        self.service
            .get_avatar_by_nickname(nickname)
            .await
            .map_err(Into::into)
    }

    async fn find(&self) -> Result<Vec<User>, UsersError> {
        self.service.find().await.map_err(Into::into)
    }

    async fn list(
        &self,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Vec<User>, UsersError> {
        self.service.list(limit, offset).await.map_err(Into::into)
    }
}
