use std::collections::HashMap;

use chrono::Utc;
use coffee_storefront::{
    models::{Product, ProductItem},
    services::store_service::select_variant,
};

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

fn latte() -> Product {
    Product {
        id: "cf-latte".into(),
        name: "Caramel Latte".into(),
        category: "cf".into(),
        tags: vec!["best-seller".into()],
        description: None,
        created_at: Utc::now(),
        items: vec![
            item(1, 35000, &[("Size", "S"), ("Temp", "hot")]),
            item(2, 42000, &[("Size", "M"), ("Temp", "hot")]),
            item(3, 45000, &[("Size", "M"), ("Temp", "iced")]),
        ],
    }
}

fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn fully_specified_query_picks_the_matching_item() {
    let selection = select_variant(&latte(), &query(&[("Size", "M"), ("Temp", "iced")]));

    assert_eq!(selection.selected_options["Size"], "M");
    assert_eq!(selection.selected_options["Temp"], "iced");
    assert_eq!(selection.available_item.map(|i| i.id), Some(3));
}

#[test]
fn missing_or_unknown_values_fall_back_to_the_first_value() {
    let selection = select_variant(&latte(), &query(&[("Size", "XL")]));

    assert_eq!(selection.selected_options["Size"], "S");
    assert_eq!(selection.selected_options["Temp"], "hot");
    assert_eq!(selection.available_item.map(|i| i.id), Some(1));
}

#[test]
fn combination_without_an_item_selects_nothing() {
    let selection = select_variant(&latte(), &query(&[("Size", "S"), ("Temp", "iced")]));

    assert_eq!(selection.selected_options["Size"], "S");
    assert_eq!(selection.selected_options["Temp"], "iced");
    assert!(selection.available_item.is_none());
}

#[test]
fn unrelated_query_parameters_are_ignored() {
    let selection = select_variant(&latte(), &query(&[("utm_source", "mail"), ("Size", "M")]));

    assert!(!selection.selected_options.contains_key("utm_source"));
    assert_eq!(selection.available_item.map(|i| i.id), Some(2));
}

#[test]
fn product_without_items_renders_an_empty_selection() {
    let mut product = latte();
    product.items.clear();

    let selection = select_variant(&product, &query(&[("Size", "M")]));
    assert!(selection.options.specs.is_empty());
    assert!(selection.selected_options.is_empty());
    assert!(selection.available_item.is_none());
}
