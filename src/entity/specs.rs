use sea_orm::entity::prelude::*;

/// A named attribute distinguishing variants, e.g. "Size".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "specs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_specs::Entity")]
    ItemSpecs,
}

impl Related<super::item_specs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemSpecs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
