use coffee_storefront::{
    entity::{ProductTags, Products, Tags},
    services::product_service::sales_per_item,
};
use sea_orm::{DbBackend, EntityTrait, QueryTrait};

#[test]
fn sales_count_names_its_table() {
    let sql = sales_per_item().build(DbBackend::Postgres).sql;

    assert!(sql.contains(r#"COUNT("record_items"."id")"#), "{sql}");
    assert!(sql.contains(r#"INNER JOIN "records""#), "{sql}");
    assert!(sql.contains(r#"GROUP BY "record_items"."item_id""#), "{sql}");
}

#[test]
fn product_tag_links_join_both_sides() {
    let sql = ProductTags::find()
        .find_also_related(Products)
        .build(DbBackend::Postgres)
        .sql;
    assert!(sql.contains(r#"LEFT JOIN "products""#), "{sql}");

    let sql = ProductTags::find()
        .find_also_related(Tags)
        .build(DbBackend::Postgres)
        .sql;
    assert!(sql.contains(r#"LEFT JOIN "tags""#), "{sql}");
}

#[test]
fn products_reach_tags_through_the_link_table() {
    let sql = Products::find()
        .find_with_related(Tags)
        .build(DbBackend::Postgres)
        .sql;
    assert!(sql.contains(r#""product_tags""#), "{sql}");
    assert!(sql.contains(r#""tags""#), "{sql}");
}
