use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub level: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_departments::Entity")]
    RoleDepartments,
}

impl Related<super::role_departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleDepartments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
