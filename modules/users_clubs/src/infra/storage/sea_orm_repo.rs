//! SeaORM-backed repository implementation for the domain port.
//!
//! The repository is generic over `C: ConnectionTrait + TransactionTrait`, so it
//! can be built on a `DatabaseConnection` (pool) in production and tests alike.
//!
//! Multi-statement writes run inside a `DatabaseTransaction`. The transaction
//! is committed explicitly; every other exit path (an early `?`, a panic, or
//! the caller dropping the future on cancellation) drops it, and SeaORM rolls
//! back on drop.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::contract::model::{Club, User};
use crate::domain::repo::{RepoError, UsersRepository};
use crate::infra::storage::entity::{club, user, user_club};
use crate::infra::storage::mapper::{to_domain, to_nullable};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    async fn begin(&self) -> Result<sea_orm::DatabaseTransaction, RepoError> {
        self.conn
            .begin()
            .await
            .map_err(|e| RepoError::Begin(e.into()))
    }

    async fn clubs_of(&self, user_id: Uuid) -> Result<Vec<club::Model>, RepoError> {
        let mut by_user = load_clubs(&self.conn, &[user_id]).await?;
        Ok(by_user.remove(&user_id).unwrap_or_default())
    }

    async fn attach_clubs(&self, rows: Vec<user::Model>) -> Result<Vec<User>, RepoError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut by_user = load_clubs(&self.conn, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let clubs = by_user.remove(&row.id).unwrap_or_default();
                to_domain(row, clubs)
            })
            .collect())
    }
}

/// Club rows for the given users in one `user_clubs ⋈ clubs` query, grouped by user.
async fn load_clubs<C>(
    conn: &C,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<club::Model>>, RepoError>
where
    C: ConnectionTrait,
{
    let mut grouped: HashMap<Uuid, Vec<club::Model>> = HashMap::new();
    if user_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = user_club::Entity::find()
        .filter(user_club::Column::UserId.is_in(user_ids.iter().copied()))
        .find_also_related(club::Entity)
        .order_by_asc(club::Column::Name)
        .order_by_asc(club::Column::Id)
        .all(conn)
        .await
        .map_err(|e| RepoError::statement("load clubs", e))?;

    for (link, club) in rows {
        if let Some(club) = club {
            grouped.entry(link.user_id).or_default().push(club);
        }
    }
    Ok(grouped)
}

/// Insert one club row and one membership row per club.
async fn insert_memberships<C>(conn: &C, user_id: Uuid, clubs: &[Club]) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    for c in clubs {
        club::Entity::insert(club::ActiveModel {
            id: Set(c.id),
            name: Set(c.name.clone()),
        })
        .exec_without_returning(conn)
        .await
        .map_err(|e| RepoError::statement("insert club", e))?;

        user_club::Entity::insert(user_club::ActiveModel {
            user_id: Set(user_id),
            club_id: Set(c.id),
        })
        .exec_without_returning(conn)
        .await
        .map_err(|e| RepoError::statement("insert membership", e))?;
    }
    Ok(())
}

fn user_insert_error(e: DbErr) -> RepoError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepoError::Duplicate(detail),
        _ => RepoError::statement("insert user", e),
    }
}

#[async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn add(&self, u: User) -> Result<User, RepoError> {
        let txn = self.begin().await?;

        let row = user::ActiveModel {
            id: Set(u.id),
            nickname: Set(u.nickname),
            img: Set(to_nullable(&u.img)),
            country: Set(to_nullable(&u.country)),
            city: Set(to_nullable(&u.city)),
            created_at: Set(u.created),
            updated_at: Set(u.updated),
            deleted: Set(false),
        }
        .insert(&txn)
        .await
        .map_err(user_insert_error)?;

        insert_memberships(&txn, row.id, &u.clubs).await?;

        txn.commit()
            .await
            .map_err(|e| RepoError::Commit(e.into()))?;
        debug!(user_id = %row.id, clubs = u.clubs.len(), "user inserted");

        let clubs = self.clubs_of(row.id).await?;
        Ok(to_domain(row, clubs))
    }

    async fn find(&self) -> Result<Vec<User>, RepoError> {
        let rows = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.conn)
            .await
            .map_err(|e| RepoError::statement("find users", e))?;
        self.attach_clubs(rows).await
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<User>, RepoError> {
        let rows = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.conn)
            .await
            .map_err(|e| RepoError::statement("list users", e))?;
        self.attach_clubs(rows).await
    }

    async fn get_img_by_nickname(&self, nickname: &str) -> Result<String, RepoError> {
        // Active rows first, then the most recently touched one.
        let row = user::Entity::find()
            .filter(user::Column::Nickname.eq(nickname))
            .order_by_asc(user::Column::Deleted)
            .order_by_desc(user::Column::UpdatedAt)
            .one(&self.conn)
            .await
            .map_err(|e| RepoError::statement("get img by nickname", e))?
            .ok_or(RepoError::NotFound)?;
        Ok(row.img.unwrap_or_default())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepoError> {
        let row = user::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(|e| RepoError::statement("get user by id", e))?
            .filter(|row| !row.deleted)
            .ok_or(RepoError::NotFound)?;

        let clubs = self.clubs_of(row.id).await?;
        Ok(to_domain(row, clubs))
    }

    async fn update(&self, u: User) -> Result<User, RepoError> {
        let txn = self.begin().await?;

        let res = user::Entity::update_many()
            .col_expr(user::Column::Country, Expr::value(to_nullable(&u.country)))
            .col_expr(user::Column::City, Expr::value(to_nullable(&u.city)))
            .col_expr(user::Column::UpdatedAt, Expr::value(u.updated))
            .filter(user::Column::Id.eq(u.id))
            .exec(&txn)
            .await
            .map_err(|e| RepoError::statement("update user", e))?;
        if res.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        // Memberships are replaced wholesale, never diffed.
        user_club::Entity::delete_many()
            .filter(user_club::Column::UserId.eq(u.id))
            .exec(&txn)
            .await
            .map_err(|e| RepoError::statement("delete memberships", e))?;

        insert_memberships(&txn, u.id, &u.clubs).await?;

        let row = user::Entity::find_by_id(u.id)
            .one(&txn)
            .await
            .map_err(|e| RepoError::statement("reload user", e))?
            .ok_or(RepoError::NotFound)?;

        txn.commit()
            .await
            .map_err(|e| RepoError::Commit(e.into()))?;
        debug!(user_id = %u.id, clubs = u.clubs.len(), "user updated");

        let clubs = self.clubs_of(row.id).await?;
        Ok(to_domain(row, clubs))
    }

    async fn update_img(&self, id: Uuid, img: &str, at: DateTime<Utc>) -> Result<User, RepoError> {
        let row = user::Entity::update_many()
            .col_expr(user::Column::Img, Expr::value(to_nullable(img)))
            .col_expr(user::Column::UpdatedAt, Expr::value(at))
            .filter(user::Column::Id.eq(id))
            .exec_with_returning(&self.conn)
            .await
            .map_err(|e| RepoError::statement("update user img", e))?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)?;

        let clubs = self.clubs_of(id).await?;
        Ok(to_domain(row, clubs))
    }

    async fn delete(&self, id: Uuid, at: DateTime<Utc>) -> Result<User, RepoError> {
        // The updated row comes back from the same statement (RETURNING).
        let row = user::Entity::update_many()
            .col_expr(user::Column::Deleted, Expr::value(true))
            .col_expr(user::Column::UpdatedAt, Expr::value(at))
            .filter(user::Column::Id.eq(id))
            .exec_with_returning(&self.conn)
            .await
            .map_err(|e| RepoError::statement("soft delete user", e))?
            .into_iter()
            .next()
            .ok_or(RepoError::NotFound)?;

        // The flag flip is already durable; a failed club read yields empty clubs.
        let clubs = match self.clubs_of(id).await {
            Ok(clubs) => clubs,
            Err(e) => {
                warn!(user_id = %id, error = %e.chain(), "clubs of deleted user unavailable");
                Vec::new()
            }
        };
        Ok(to_domain(row, clubs))
    }
}
