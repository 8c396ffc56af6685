pub mod item_specs;
pub mod items;
pub mod product_tags;
pub mod products;
pub mod record_items;
pub mod records;
pub mod roles;
pub mod specs;
pub mod tags;
pub mod users;

pub use item_specs::Entity as ItemSpecs;
pub use items::Entity as Items;
pub use product_tags::Entity as ProductTags;
pub use products::Entity as Products;
pub use record_items::Entity as RecordItems;
pub use records::Entity as Records;
pub use roles::Entity as Roles;
pub use specs::Entity as Specs;
pub use tags::Entity as Tags;
pub use users::Entity as Users;
