use sea_orm::entity::prelude::*;

/// Club rows are never looked up by name; every write creates fresh ones.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clubs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
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

impl ActiveModelBehavior for ActiveModel {}
