//! Tests to verify that service methods emit expected tracing output

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing_test::traced_test;
use uuid::Uuid;

use users_clubs::contract::model::{NewUser, User, UserUpdate};
use users_clubs::domain::repo::{RepoError, UsersRepository};
use users_clubs::domain::service::{Service, ServiceConfig};

const KNOWN_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

// Mock repository for testing
#[derive(Default)]
struct MockUsersRepository {
    users: Mutex<Vec<User>>,
    fail: bool,
}

impl MockUsersRepository {
    fn seeded() -> Self {
        let now = Utc::now();
        Self {
            users: Mutex::new(vec![User {
                id: Uuid::parse_str(KNOWN_ID).unwrap(),
                nickname: "neo".to_string(),
                img: "neo.png".to_string(),
                country: String::new(),
                city: String::new(),
                clubs: vec![],
                created: now,
                updated: now,
                deleted: false,
            }]),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.fail {
            Err(RepoError::statement("mock", anyhow::anyhow!("connection refused")))
        } else {
            Ok(())
        }
    }

    fn with_user<T>(&self, id: Uuid, f: impl FnOnce(&mut User) -> T) -> Result<T, RepoError> {
        let mut users = self.users.lock().unwrap();
        users
            .iter_mut()
            .find(|u| u.id == id)
            .map(f)
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UsersRepository for MockUsersRepository {
    async fn add(&self, user: User) -> Result<User, RepoError> {
        self.check()?;
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn find(&self) -> Result<Vec<User>, RepoError> {
        self.check()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<User>, RepoError> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_img_by_nickname(&self, nickname: &str) -> Result<String, RepoError> {
        self.check()?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.nickname == nickname)
            .map(|u| u.img.clone())
            .ok_or(RepoError::NotFound)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepoError> {
        self.check()?;
        self.with_user(id, |u| u.clone())
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        self.check()?;
        self.with_user(user.id, |u| {
            u.country = user.country;
            u.city = user.city;
            u.clubs = user.clubs;
            u.updated = user.updated;
            u.clone()
        })
    }

    async fn update_img(&self, id: Uuid, img: &str, at: DateTime<Utc>) -> Result<User, RepoError> {
        self.check()?;
        self.with_user(id, |u| {
            u.img = img.to_string();
            u.updated = at;
            u.clone()
        })
    }

    async fn delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<User, RepoError> {
        self.check()?;
        self.with_user(id, |u| {
            u.deleted = true;
            u.updated = at;
            u.clone()
        })
    }
}

fn service(repo: MockUsersRepository) -> Service {
    Service::new(Arc::new(repo), ServiceConfig::default())
}

#[traced_test]
#[tokio::test]
async fn add_emits_spans() {
    let svc = service(MockUsersRepository::default());

    let result = svc
        .add(NewUser {
            nickname: "trinity".to_string(),
            clubs: vec!["Chess".to_string()],
            ..Default::default()
        })
        .await;

    assert!(result.is_ok());
    assert!(logs_contain("users_clubs.service.add"));
    assert!(logs_contain("Successfully created user"));
}

#[traced_test]
#[tokio::test]
async fn get_by_id_emits_spans() {
    let svc = service(MockUsersRepository::seeded());
    let id = Uuid::parse_str(KNOWN_ID).unwrap();

    let user = svc.get_by_id(id).await.unwrap();

    assert_eq!(user.nickname, "neo");
    assert!(logs_contain("users_clubs.service.get_by_id"));
    assert!(logs_contain(KNOWN_ID));
}

#[traced_test]
#[tokio::test]
async fn update_and_delete_emit_spans() {
    let svc = service(MockUsersRepository::seeded());
    let id = Uuid::parse_str(KNOWN_ID).unwrap();

    svc.update(UserUpdate {
        id,
        country: "Japan".into(),
        city: "Tokyo".into(),
        clubs: vec!["Go".into()],
    })
    .await
    .unwrap();
    svc.update_img(id, "new.png".into()).await.unwrap();
    svc.delete(KNOWN_ID).await.unwrap();

    assert!(logs_contain("users_clubs.service.update"));
    assert!(logs_contain("users_clubs.service.update_img"));
    assert!(logs_contain("users_clubs.service.delete"));
    assert!(logs_contain("Successfully soft-deleted user"));
}

#[traced_test]
#[tokio::test]
async fn repository_failure_is_logged_and_internal() {
    let svc = service(MockUsersRepository::failing());

    let err = svc.find().await.unwrap_err();

    assert_eq!(
        err.kind(),
        users_clubs::contract::error::ErrorKind::Internal
    );
    assert!(logs_contain("Repository call failed"));
    assert!(logs_contain("connection refused"));
}

#[traced_test]
#[tokio::test]
async fn list_logs_resolved_window() {
    let svc = service(MockUsersRepository::seeded());

    let users = svc.list(Some("-5"), Some("abc")).await.unwrap();

    assert_eq!(users.len(), 1);
    assert!(logs_contain("users_clubs.service.list"));
    assert!(logs_contain("limit=10"));
}

#[test]
fn resolve_window_accepts_any_positive_limit() {
    let svc = Service::new(
        Arc::new(MockUsersRepository::default()),
        ServiceConfig {
            default_page_size: 10,
        },
    );
    assert_eq!(svc.resolve_window(Some("5000"), None), (5000, 0));
    assert_eq!(svc.resolve_window(Some("500"), Some("3")), (500, 3));
    assert_eq!(svc.resolve_window(None, None), (10, 0));
    assert_eq!(svc.resolve_window(Some("0"), Some("-2")), (10, 0));
}

#[traced_test]
#[tokio::test]
async fn list_passes_large_limit_to_repository() {
    let svc = service(MockUsersRepository::seeded());

    let users = svc.list(Some("5000"), None).await.unwrap();

    assert_eq!(users.len(), 1);
    assert!(logs_contain("limit=5000"));
    assert!(logs_contain("offset=0"));
}
