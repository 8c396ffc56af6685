use sea_orm::entity::prelude::*;

/// A tag is identified by its label ("best-seller", "christmas").
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_tags::Entity")]
    ProductTags,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_tags::Relation::Products.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_tags::Relation::Tags.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
