//! gRPC surface: `users.v1.Users` handlers and the tonic service routing them.

mod common;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use prost::Message;
use tonic::Code;
use tower::ServiceExt;
use uuid::Uuid;

use users_clubs::api::rpc::{
    proto::{
        AddUserRequest, DeleteUserRequest, FindUsersRequest, GetAvatarByNicknameRequest,
        GetByIdRequest, GetByIdResponse, ListUsersRequest, UpdateImgRequest, UpdateUserRequest,
    },
    Users, UsersRpc, UsersServer,
};

use common::create_test_rpc;

async fn add(rpc: &UsersRpc, nickname: &str, clubs: &[&str]) -> Result<String> {
    let resp = rpc
        .add(tonic::Request::new(AddUserRequest {
            nickname: nickname.to_string(),
            img: "a.png".to_string(),
            clubs: clubs.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }))
        .await?;
    Ok(resp.into_inner().user.map(|u| u.id).unwrap_or_default())
}

/// Length-prefixed gRPC frame around an encoded message.
fn grpc_request<M: Message>(method: &str, msg: &M) -> Result<Request<Body>> {
    grpc_raw_request(method, msg.encode_to_vec())
}

fn grpc_raw_request(method: &str, payload: Vec<u8>) -> Result<Request<Body>> {
    let mut frame = Vec::with_capacity(payload.len() + 5);
    frame.push(0);
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(Request::builder()
        .method("POST")
        .uri(format!("/users.v1.Users/{method}"))
        .header("content-type", "application/grpc")
        .header("te", "trailers")
        .body(Body::from(frame))?)
}

/// Send one request through the service; returns the `grpc-status` header
/// (set on trailers-only error replies) and the raw body.
async fn send(
    svc: &UsersServer<UsersRpc>,
    req: Request<Body>,
) -> Result<(Option<String>, Vec<u8>)> {
    let resp = svc.clone().oneshot(req).await?;
    let status = resp
        .headers()
        .get("grpc-status")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(Body::new(resp.into_body()), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

#[tokio::test]
async fn add_get_update_flow() -> Result<()> {
    let (rpc, _) = create_test_rpc().await;
    let id = add(&rpc, "neo", &["A", "B"]).await?;
    assert!(Uuid::parse_str(&id).is_ok());

    rpc.update(tonic::Request::new(UpdateUserRequest {
        user_id: id.clone(),
        country: "Japan".into(),
        city: "Tokyo".into(),
        clubs: vec!["B".into(), "C".into()],
    }))
    .await?;

    let user = rpc
        .get_by_id(tonic::Request::new(GetByIdRequest {
            user_id: id.clone(),
        }))
        .await?
        .into_inner()
        .user
        .expect("user in response");
    assert_eq!(user.country, "Japan");
    assert!(user.created.is_some());
    let mut names: Vec<&str> = user.clubs.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["B", "C"]);
    Ok(())
}

#[tokio::test]
async fn statuses_use_canonical_codes() -> Result<()> {
    let (rpc, _) = create_test_rpc().await;
    add(&rpc, "neo", &[]).await?;

    let err = rpc
        .get_by_id(tonic::Request::new(GetByIdRequest {
            user_id: "nope".into(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    let err = rpc
        .get_by_id(tonic::Request::new(GetByIdRequest {
            user_id: Uuid::new_v4().to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::NotFound);

    let err = rpc
        .add(tonic::Request::new(AddUserRequest {
            nickname: "neo".into(),
            ..Default::default()
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::AlreadyExists);

    let err = rpc
        .delete(tonic::Request::new(DeleteUserRequest::default()))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);
    assert!(
        err.message().contains("user id is required"),
        "{}",
        err.message()
    );
    Ok(())
}

#[tokio::test]
async fn delete_find_and_list() -> Result<()> {
    let (rpc, _) = create_test_rpc().await;
    let id = add(&rpc, "neo", &["Chess"]).await?;
    for i in 0..11 {
        add(&rpc, &format!("user{i:02}"), &[]).await?;
    }

    for _ in 0..2 {
        rpc.delete(tonic::Request::new(DeleteUserRequest {
            user_id: id.clone(),
        }))
        .await?;
    }

    let users = rpc
        .find(tonic::Request::new(FindUsersRequest {}))
        .await?
        .into_inner()
        .users;
    assert_eq!(users.len(), 12);
    assert!(users.iter().any(|u| u.id == id && u.deleted));

    let page = rpc
        .list(tonic::Request::new(ListUsersRequest::default()))
        .await?
        .into_inner()
        .users;
    assert_eq!(page.len(), 10);

    let page = rpc
        .list(tonic::Request::new(ListUsersRequest {
            limit: -5,
            offset: 10,
        }))
        .await?
        .into_inner()
        .users;
    assert_eq!(page.len(), 2);
    Ok(())
}

#[tokio::test]
async fn update_img_and_avatar_lookup() -> Result<()> {
    let (rpc, _) = create_test_rpc().await;
    let id = add(&rpc, "neo", &[]).await?;

    rpc.update_img(tonic::Request::new(UpdateImgRequest {
        user_id: id,
        img: "new.png".into(),
    }))
    .await?;

    let avatar = rpc
        .get_avatar_by_nickname(tonic::Request::new(GetAvatarByNicknameRequest {
            nickname: "neo".into(),
        }))
        .await?
        .into_inner()
        .avatar;
    assert_eq!(avatar, "new.png");

    let err = rpc
        .get_avatar_by_nickname(tonic::Request::new(GetAvatarByNicknameRequest {
            nickname: "x".into(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::NotFound);
    Ok(())
}

#[tokio::test]
async fn service_routes_methods_over_the_wire() -> Result<()> {
    let (rpc, svc) = create_test_rpc().await;
    let id = add(&rpc, "neo", &["Chess"]).await?;

    let (status, body) = send(
        &svc,
        grpc_request("GetById", &GetByIdRequest { user_id: id.clone() })?,
    )
    .await?;
    assert_eq!(status, None);
    assert!(body.len() > 5, "expected a framed message");
    let user = GetByIdResponse::decode(&body[5..])?
        .user
        .expect("user in response");
    assert_eq!(user.id, id);
    assert_eq!(user.nickname, "neo");

    let (status, _) = send(
        &svc,
        grpc_request(
            "GetById",
            &GetByIdRequest {
                user_id: Uuid::new_v4().to_string(),
            },
        )?,
    )
    .await?;
    assert_eq!(status.as_deref(), Some("5"));
    Ok(())
}

#[tokio::test]
async fn unknown_method_is_unimplemented() -> Result<()> {
    let (_, svc) = create_test_rpc().await;
    let (status, _) = send(&svc, grpc_request("Frobnicate", &FindUsersRequest {})?).await?;
    assert_eq!(status.as_deref(), Some("12"));
    Ok(())
}

#[tokio::test]
async fn malformed_message_is_rejected() -> Result<()> {
    let (_, svc) = create_test_rpc().await;
    // Field 1 declared as a 10-byte string with only two bytes present.
    let (status, _) = send(&svc, grpc_raw_request("Add", vec![0x0a, 0x0a, b'n', b'e'])?).await?;
    let code = status.expect("grpc-status header on rejected message");
    assert_ne!(code, "0", "truncated message must not succeed");
    Ok(())
}
