use coffee_storefront::{
    dto::{
        items::{ItemFormInput, parse_specs, validate_item_patch, validate_new_item},
        products::{
            ProductFormInput, SizeEntry, parse_sizes, parse_tags, validate_new_product,
            validate_product_patch,
        },
        validation::{ValidationReason, price},
    },
    models::Category,
};

fn product_form() -> ProductFormInput {
    ProductFormInput {
        id: Some("cf-latte".into()),
        name: Some(" Caramel Latte ".into()),
        category: Some("cf".into()),
        description: Some("".into()),
        tags: Some("best-seller, christmas,,best-seller".into()),
        sizes: None,
    }
}

#[test]
fn new_product_is_trimmed_and_tags_are_split() {
    let product = validate_new_product(&product_form()).unwrap();

    assert_eq!(product.id, "cf-latte");
    assert_eq!(product.name, "Caramel Latte");
    assert_eq!(product.category, Category::Cf);
    assert_eq!(product.tags, vec!["best-seller", "christmas"]);
    assert_eq!(product.description, None);
}

#[test]
fn new_product_requires_id_and_name() {
    let mut form = product_form();
    form.id = None;
    let err = validate_new_product(&form).unwrap_err();
    assert_eq!(err.field, "id");
    assert_eq!(err.reason, ValidationReason::Missing);

    let mut form = product_form();
    form.name = Some("   ".into());
    let err = validate_new_product(&form).unwrap_err();
    assert_eq!(err.field, "name");
    assert_eq!(err.reason, ValidationReason::Empty);
}

#[test]
fn category_must_be_known() {
    let mut form = product_form();
    form.category = Some("juice".into());

    let err = validate_new_product(&form).unwrap_err();
    assert_eq!(err.field, "category");
    assert_eq!(err.reason, ValidationReason::UnknownCategory("juice".into()));
    assert!(err.to_string().contains("juice"));
}

#[test]
fn patch_leaves_absent_fields_untouched() {
    let patch = validate_product_patch(&ProductFormInput {
        id: Some("cf-latte".into()),
        category: Some("tea".into()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(patch.name, None);
    assert_eq!(patch.category, Some(Category::Tea));
    assert_eq!(patch.tags, None);
    assert_eq!(patch.description, None);
}

#[test]
fn tags_are_deduplicated_in_order() {
    assert_eq!(parse_tags(" a ,b, a,,c").unwrap(), vec!["a", "b", "c"]);
    assert!(parse_tags("").unwrap().is_empty());
}

#[test]
fn sizes_accept_numeric_and_string_prices() {
    let sizes = parse_sizes(Some(r#"[{"size":"M","price":"42000"},{"size":"L","price":49000}]"#))
        .unwrap();

    assert_eq!(
        sizes,
        vec![
            SizeEntry {
                size: "M".into(),
                price: 42000
            },
            SizeEntry {
                size: "L".into(),
                price: 49000
            },
        ]
    );
}

#[test]
fn malformed_or_missing_sizes_mean_no_sizes() {
    assert!(parse_sizes(None).unwrap().is_empty());
    assert!(parse_sizes(Some("")).unwrap().is_empty());
    assert!(parse_sizes(Some("not json")).unwrap().is_empty());
    assert!(parse_sizes(Some("[]")).unwrap().is_empty());
}

#[test]
fn non_numeric_size_price_is_rejected() {
    let err = parse_sizes(Some(r#"[{"size":"M","price":"free"}]"#)).unwrap_err();
    assert_eq!(err.field, "sizes");
    assert_eq!(err.reason, ValidationReason::NotANumber("free".into()));

    let err = parse_sizes(Some(r#"[{"size":"M","price":-5}]"#)).unwrap_err();
    assert_eq!(err.reason, ValidationReason::Negative);
}

#[test]
fn new_item_parses_specs_object() {
    let item = validate_new_item(&ItemFormInput {
        product_id: Some("cf-latte".into()),
        price: Some("45000".into()),
        specs: Some(r#"{"Size":"M","Temp":"iced"}"#.into()),
    })
    .unwrap();

    assert_eq!(item.product_id, "cf-latte");
    assert_eq!(item.price, 45000);
    assert_eq!(item.specs.get("Temp").map(String::as_str), Some("iced"));
}

#[test]
fn new_item_requires_price() {
    let err = validate_new_item(&ItemFormInput {
        product_id: Some("cf-latte".into()),
        price: None,
        specs: None,
    })
    .unwrap_err();
    assert_eq!(err.field, "price");
}

#[test]
fn item_patch_ignores_blank_fields() {
    let patch = validate_item_patch(&ItemFormInput {
        product_id: Some("".into()),
        price: Some("50000".into()),
        specs: None,
    })
    .unwrap();

    assert_eq!(patch.product_id, None);
    assert_eq!(patch.price, Some(50000));
    assert_eq!(patch.specs, None);
}

#[test]
fn specs_must_be_an_object_of_non_empty_strings() {
    assert_eq!(
        parse_specs(r#"["Size"]"#).unwrap_err().field,
        "specs"
    );
    assert_eq!(
        parse_specs(r#"{"Size":" "}"#).unwrap_err().reason,
        ValidationReason::Empty
    );
}

#[test]
fn blank_description_in_an_update_clears_it() {
    let patch = validate_product_patch(&ProductFormInput {
        description: Some("  ".into()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(patch.description, Some(None));

    let patch = validate_product_patch(&ProductFormInput {
        description: Some(" Rich and nutty ".into()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(patch.description, Some(Some("Rich and nutty".to_string())));
}

#[test]
fn prices_outside_the_integer_range_are_rejected() {
    let err = price("price", "1e30").unwrap_err();
    assert_eq!(err.reason, ValidationReason::NotANumber("1e30".into()));
    assert!(price("price", "9223372036854775808").is_err());
    assert!(price("price", "9.3e18").is_err());

    assert_eq!(price("price", "9223372036854775807").unwrap(), i64::MAX);
    assert_eq!(price("price", "45000.0").unwrap(), 45000);
}
