use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: String,
    pub price: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "Cascade"
    )]
    Products,
    #[sea_orm(has_many = "super::item_specs::Entity")]
    ItemSpecs,
    #[sea_orm(has_many = "super::record_items::Entity")]
    RecordItems,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::item_specs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemSpecs.def()
    }
}

impl Related<super::record_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecordItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
