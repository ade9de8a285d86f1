//! Protobuf messages and the server half of `users.v1.Users`.
//!
//! Mirrors `proto/users/v1/users.proto` in the layout tonic-build emits, so no
//! protoc is needed at build time. Keep field tags in sync with the proto file.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Club {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub nickname: String,
    #[prost(string, tag = "3")]
    pub img: String,
    #[prost(string, tag = "4")]
    pub country: String,
    #[prost(string, tag = "5")]
    pub city: String,
    #[prost(message, repeated, tag = "6")]
    pub clubs: Vec<Club>,
    #[prost(message, optional, tag = "7")]
    pub created: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "8")]
    pub updated: Option<::prost_types::Timestamp>,
    #[prost(bool, tag = "9")]
    pub deleted: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddUserRequest {
    #[prost(string, tag = "1")]
    pub nickname: String,
    #[prost(string, tag = "2")]
    pub img: String,
    #[prost(string, tag = "3")]
    pub country: String,
    #[prost(string, tag = "4")]
    pub city: String,
    #[prost(string, repeated, tag = "5")]
    pub clubs: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddUserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateUserRequest {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(string, tag = "2")]
    pub country: String,
    #[prost(string, tag = "3")]
    pub city: String,
    #[prost(string, repeated, tag = "4")]
    pub clubs: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct UpdateUserResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateImgRequest {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(string, tag = "2")]
    pub img: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct UpdateImgResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteUserRequest {
    #[prost(string, tag = "1")]
    pub user_id: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DeleteUserResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetByIdRequest {
    #[prost(string, tag = "1")]
    pub user_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetByIdResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAvatarByNicknameRequest {
    #[prost(string, tag = "1")]
    pub nickname: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAvatarByNicknameResponse {
    #[prost(string, tag = "1")]
    pub avatar: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct FindUsersRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FindUsersResponse {
    #[prost(message, repeated, tag = "1")]
    pub users: Vec<User>,
}

/// Zero or negative values mean "use the default".
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ListUsersRequest {
    #[prost(int32, tag = "1")]
    pub limit: i32,
    #[prost(int32, tag = "2")]
    pub offset: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListUsersResponse {
    #[prost(message, repeated, tag = "1")]
    pub users: Vec<User>,
}

/// Server-side plumbing for `users.v1.Users`.
pub mod users_server {
    use std::convert::Infallible;
    use std::sync::Arc;
    use std::task::{Context, Poll};

    use tonic::codegen::{empty_body, http, Body, BoxFuture, Service, StdError};

    /// Fully-qualified service name, also the route prefix.
    pub const SERVICE_NAME: &str = "users.v1.Users";

    /// Handlers for every `users.v1.Users` method.
    #[async_trait::async_trait]
    pub trait Users: Send + Sync + 'static {
        async fn add(
            &self,
            request: tonic::Request<super::AddUserRequest>,
        ) -> Result<tonic::Response<super::AddUserResponse>, tonic::Status>;

        async fn update(
            &self,
            request: tonic::Request<super::UpdateUserRequest>,
        ) -> Result<tonic::Response<super::UpdateUserResponse>, tonic::Status>;

        async fn update_img(
            &self,
            request: tonic::Request<super::UpdateImgRequest>,
        ) -> Result<tonic::Response<super::UpdateImgResponse>, tonic::Status>;

        async fn delete(
            &self,
            request: tonic::Request<super::DeleteUserRequest>,
        ) -> Result<tonic::Response<super::DeleteUserResponse>, tonic::Status>;

        async fn get_by_id(
            &self,
            request: tonic::Request<super::GetByIdRequest>,
        ) -> Result<tonic::Response<super::GetByIdResponse>, tonic::Status>;

        async fn get_avatar_by_nickname(
            &self,
            request: tonic::Request<super::GetAvatarByNicknameRequest>,
        ) -> Result<tonic::Response<super::GetAvatarByNicknameResponse>, tonic::Status>;

        async fn find(
            &self,
            request: tonic::Request<super::FindUsersRequest>,
        ) -> Result<tonic::Response<super::FindUsersResponse>, tonic::Status>;

        async fn list(
            &self,
            request: tonic::Request<super::ListUsersRequest>,
        ) -> Result<tonic::Response<super::ListUsersResponse>, tonic::Status>;
    }

    /// Routes gRPC requests by path to a [`Users`] implementation.
    #[derive(Debug)]
    pub struct UsersServer<T> {
        inner: Arc<T>,
    }

    impl<T> UsersServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }

        pub fn from_arc(inner: Arc<T>) -> Self {
            Self { inner }
        }
    }

    impl<T> Clone for UsersServer<T> {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
            }
        }
    }

    impl<T> tonic::server::NamedService for UsersServer<T> {
        const NAME: &'static str = SERVICE_NAME;
    }

    // Expands to one unary route: a per-method UnaryService plus the prost codec.
    macro_rules! unary {
        ($inner:expr, $req:expr, $method:ident, $Req:ty, $Resp:ty) => {{
            struct MethodSvc<T: Users>(Arc<T>);

            impl<T: Users> tonic::server::UnaryService<$Req> for MethodSvc<T> {
                type Response = $Resp;
                type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;

                fn call(&mut self, request: tonic::Request<$Req>) -> Self::Future {
                    let inner = Arc::clone(&self.0);
                    Box::pin(async move { <T as Users>::$method(&inner, request).await })
                }
            }

            let inner = $inner;
            let req = $req;
            Box::pin(async move {
                let codec = tonic::codec::ProstCodec::<$Resp, $Req>::default();
                let mut grpc = tonic::server::Grpc::new(codec);
                Ok(grpc.unary(MethodSvc(inner), req).await)
            })
        }};
    }

    impl<T, B> Service<http::Request<B>> for UsersServer<T>
    where
        T: Users,
        B: Body + Send + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = Arc::clone(&self.inner);
            match req.uri().path() {
                "/users.v1.Users/Add" => {
                    unary!(inner, req, add, super::AddUserRequest, super::AddUserResponse)
                }
                "/users.v1.Users/Update" => unary!(
                    inner,
                    req,
                    update,
                    super::UpdateUserRequest,
                    super::UpdateUserResponse
                ),
                "/users.v1.Users/UpdateImg" => unary!(
                    inner,
                    req,
                    update_img,
                    super::UpdateImgRequest,
                    super::UpdateImgResponse
                ),
                "/users.v1.Users/Delete" => unary!(
                    inner,
                    req,
                    delete,
                    super::DeleteUserRequest,
                    super::DeleteUserResponse
                ),
                "/users.v1.Users/GetById" => unary!(
                    inner,
                    req,
                    get_by_id,
                    super::GetByIdRequest,
                    super::GetByIdResponse
                ),
                "/users.v1.Users/GetAvatarByNickname" => unary!(
                    inner,
                    req,
                    get_avatar_by_nickname,
                    super::GetAvatarByNicknameRequest,
                    super::GetAvatarByNicknameResponse
                ),
                "/users.v1.Users/Find" => unary!(
                    inner,
                    req,
                    find,
                    super::FindUsersRequest,
                    super::FindUsersResponse
                ),
                "/users.v1.Users/List" => unary!(
                    inner,
                    req,
                    list,
                    super::ListUsersRequest,
                    super::ListUsersResponse
                ),
                _ => Box::pin(async move { Ok(unimplemented_response()) }),
            }
        }
    }

    /// Trailers-only `UNIMPLEMENTED` reply for unknown methods.
    fn unimplemented_response() -> http::Response<tonic::body::BoxBody> {
        let mut response = http::Response::new(empty_body());
        let headers = response.headers_mut();
        headers.insert(
            "grpc-status",
            http::HeaderValue::from(tonic::Code::Unimplemented as i32),
        );
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/grpc"),
        );
        response
    }
}
