use sea_orm::ConnectionTrait;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Nickname,
    Img,
    Country,
    City,
    CreatedAt,
    UpdatedAt,
    Deleted,
}

#[derive(DeriveIden)]
enum Clubs {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum UserClubs {
    Table,
    UserId,
    ClubId,
}

// Nicknames are unique among active users only; soft-deleted rows keep theirs.
const CREATE_ACTIVE_NICKNAME_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
     ux_users_nickname_active ON users (nickname) WHERE deleted = false";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Nickname).string().not_null())
                    .col(ColumnDef::new(Users::Img).string().null())
                    .col(ColumnDef::new(Users::Country).string().null())
                    .col(ColumnDef::new(Users::City).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::Deleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clubs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clubs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Clubs::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserClubs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserClubs::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserClubs::ClubId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserClubs::UserId)
                            .col(UserClubs::ClubId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_clubs_user")
                            .from(UserClubs::Table, UserClubs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_clubs_club")
                            .from(UserClubs::Table, UserClubs::ClubId)
                            .to(Clubs::Table, Clubs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_user_clubs_club_id")
                    .table(UserClubs::Table)
                    .col(UserClubs::ClubId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(CREATE_ACTIVE_NICKNAME_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserClubs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clubs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
