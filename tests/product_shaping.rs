use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use coffee_storefront::{
    dto::store::ProductOptions,
    models::{
        ItemRecord, Product, ProductItem, ProductRecord, SpecName, SpecValueRecord, Specs, TagRef,
    },
    services::product_service::{all_item_specs, item_from_record, product_from_record, rank_by_sales},
};

fn values(options: &ProductOptions, name: &str) -> Vec<String> {
    options
        .specs
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.values.clone())
        .unwrap_or_default()
}

fn spec(name: &str, value: &str) -> SpecValueRecord {
    SpecValueRecord {
        spec: SpecName {
            name: name.to_string(),
        },
        value: value.to_string(),
    }
}

fn item(id: i32, price: i64, specs: &[(&str, &str)]) -> ProductItem {
    ProductItem {
        id,
        price,
        specs: specs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

fn product(id: &str, day: u32, items: Vec<ProductItem>) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        category: "cf".to_string(),
        tags: Vec::new(),
        description: None,
        created_at: Utc.with_ymd_and_hms(2025, 12, day, 8, 0, 0).unwrap(),
        items,
    }
}

#[test]
fn product_record_is_flattened() {
    let record = ProductRecord {
        id: "cf-latte".into(),
        name: "Caramel Latte".into(),
        category: "cf".into(),
        tags: vec![TagRef {
            id: "christmas".into(),
        }],
        description: None,
        created_at: Utc.with_ymd_and_hms(2025, 12, 1, 8, 0, 0).unwrap(),
        items: vec![ItemRecord {
            id: 7,
            product_id: "cf-latte".into(),
            price: 42000,
            specs: vec![spec("Size", "M")],
        }],
    };

    let shaped = product_from_record(record);
    assert_eq!(shaped.tags, vec!["christmas".to_string()]);
    assert_eq!(shaped.items.len(), 1);
    assert_eq!(shaped.items[0].specs, Specs::from([("Size".into(), "M".into())]));

    let json = serde_json::to_value(&shaped.items[0]).unwrap();
    assert!(json.get("productId").is_none());
    assert!(json.get("product_id").is_none());
    assert_eq!(json["specs"]["Size"], "M");
}

#[test]
fn standalone_item_keeps_product_id() {
    let shaped = item_from_record(ItemRecord {
        id: 3,
        product_id: "tea-peach".into(),
        price: 39000,
        specs: vec![spec("Size", "M"), spec("Sugar", "50%")],
    });

    assert_eq!(shaped.product_id, "tea-peach");
    assert_eq!(shaped.specs.len(), 2);
    let json = serde_json::to_value(&shaped).unwrap();
    assert_eq!(json["productId"], "tea-peach");
}

#[test]
fn options_hold_exactly_the_observed_values() {
    let p = product(
        "cf-latte",
        1,
        vec![
            item(3, 49000, &[("Size", "L"), ("Milk", "oat")]),
            item(1, 35000, &[("Size", "S"), ("Milk", "whole")]),
            item(2, 42000, &[("Size", "M"), ("Milk", "whole")]),
        ],
    );

    let options = all_item_specs(&p);
    let names: Vec<&str> = options.specs.iter().map(|spec| spec.name.as_str()).collect();
    assert_eq!(names, vec!["Milk", "Size"]);
    assert_eq!(values(&options, "Size"), vec!["S", "M", "L"]);
    assert_eq!(values(&options, "Milk"), vec!["whole", "oat"]);
}

#[test]
fn options_include_specs_only_some_items_have() {
    let p = product(
        "bread-stollen",
        1,
        vec![item(1, 30000, &[("Size", "Slice")]), item(2, 180000, &[("Size", "Loaf"), ("Box", "Gift")])],
    );

    let options = all_item_specs(&p);
    assert_eq!(options.specs.len(), 2);
    assert_eq!(values(&options, "Box"), vec!["Gift"]);
}

#[test]
fn product_without_items_has_no_options() {
    let p = product("ice-matcha", 1, Vec::new());
    assert!(all_item_specs(&p).specs.is_empty());
}

#[test]
fn sales_ranking_sums_items_and_breaks_ties_explicitly() {
    let products = vec![
        product("a", 1, vec![item(1, 10, &[]), item(2, 10, &[])]),
        product("b", 2, vec![item(3, 10, &[])]),
        product("c", 3, vec![item(4, 10, &[])]),
        product("d", 3, vec![item(5, 10, &[])]),
    ];
    let sales = HashMap::from([(1, 2), (2, 3), (3, 5), (4, 1), (5, 1)]);

    let ranked: Vec<String> = rank_by_sales(products, &sales, 10)
        .into_iter()
        .map(|p| p.id)
        .collect();

    // a and b both sold 5; b is newer. c and d share sales and date; id decides.
    assert_eq!(ranked, vec!["b", "a", "c", "d"]);
}

#[test]
fn sales_ranking_respects_take() {
    let products = vec![
        product("a", 1, vec![item(1, 10, &[])]),
        product("b", 2, vec![item(2, 10, &[])]),
    ];
    let sales = HashMap::from([(1, 4)]);

    let ranked = rank_by_sales(products, &sales, 1);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, "a");
}
