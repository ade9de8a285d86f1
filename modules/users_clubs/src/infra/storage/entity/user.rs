use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nickname: String,
    pub img: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_club::Entity")]
    UserClub,
}

impl Related<super::user_club::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserClub.def()
    }
}

impl Related<super::club::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_club::Relation::Club.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_club::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
