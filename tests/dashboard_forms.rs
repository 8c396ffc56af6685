use chrono::{TimeZone, Utc};
use coffee_storefront::{
    dto::{
        dashboard::{ItemEditForm, ProductEditForm, RecordView, SizeField},
        store::category_photo,
    },
    middleware::auth::{Viewer, ensure_staff},
    models::{Product, ProductItem, Record, RecordLine, Specs, User},
    services::{
        dashboard_service::product_row,
        product_service::ProductFilter,
        store_service::{CategoryQuery, effective_filter},
        user_service::is_fallback_user,
    },
};

fn latte() -> Product {
    Product {
        id: "cf-latte".into(),
        name: "Caramel Latte".into(),
        category: "cf".into(),
        tags: vec!["best-seller".into(), "christmas".into()],
        description: None,
        created_at: Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap(),
        items: vec![
            ProductItem {
                id: 7,
                price: 35000,
                specs: Specs::from([("Size".to_string(), "S".to_string())]),
            },
            ProductItem {
                id: 8,
                price: 42000,
                specs: Specs::from([("Temp".to_string(), "hot".to_string())]),
            },
        ],
    }
}

#[test]
fn product_form_is_prefilled_from_the_product() {
    let form = ProductEditForm::from_product(&latte());

    assert_eq!(form.action, "/dashboard/products/update-product?id=cf-latte");
    assert_eq!(form.tags_str, "best-seller,christmas");
    assert_eq!(form.description, "");
    assert_eq!(
        form.sizes,
        vec![
            SizeField {
                size: "S".into(),
                price: "35000".into()
            },
            SizeField {
                size: "".into(),
                price: "42000".into()
            },
        ]
    );
}

#[test]
fn blank_product_form_posts_to_add() {
    let form = ProductEditForm::blank();
    assert_eq!(form.action, "/dashboard/products/add-product");
    assert!(form.id.is_empty());
    assert!(form.sizes.is_empty());
}

#[test]
fn item_forms_carry_their_product() {
    let product = latte();
    let form = ItemEditForm::from_item(&product.id, &product.items[1]);
    assert_eq!(form.action, "/dashboard/products/update-item?id=8");
    assert_eq!(form.id, Some(8));
    assert_eq!(form.product_id, "cf-latte");
    assert_eq!(form.price, "42000");

    let json = serde_json::to_value(&form).unwrap();
    assert_eq!(json["productId"], "cf-latte");

    let new = ItemEditForm::new_for("cf-latte");
    assert_eq!(new.action, "/dashboard/products/add-item");
    assert_eq!(new.id, None);
}

#[test]
fn product_row_bundles_forms_and_options() {
    let row = product_row(latte());

    assert_eq!(row.item_forms.len(), 2);
    assert_eq!(row.new_item_form.product_id, "cf-latte");
    assert_eq!(row.options.specs.iter().map(|spec| spec.name.as_str()).collect::<Vec<_>>(), vec!["Size", "Temp"]);
}

#[test]
fn record_view_renders_string_id_and_dates() {
    let record = Record {
        id: 9_007_199_254_740_993,
        user_id: Some(2),
        status: "success".into(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
        items: vec![RecordLine {
            item_id: Some(7),
            amount: 2,
            price: 35000,
        }],
    };

    let view = RecordView::from_record(record);

    assert_eq!(view.id, "9007199254740993");
    assert_eq!(view.created_at_iso, "2024-03-05T14:30:00.000Z");
    assert_eq!(view.created_at_formatted, "05/03/2024");

    let items: serde_json::Value = serde_json::from_str(&view.items_json).unwrap();
    assert_eq!(items[0]["itemId"], 7);
    assert_eq!(items[0]["amount"], 2);
}

#[test]
fn fallback_user_is_recognised_by_name_or_email() {
    let user = |name: &str, email: &str| User {
        id: 1,
        name: name.into(),
        email: email.into(),
        role: None,
    };

    assert!(is_fallback_user(&user("fallback", "x@example.com")));
    assert!(is_fallback_user(&user("Someone", "fallback@smartphone-store")));
    assert!(!is_fallback_user(&user("Admin", "admin@example.com")));
}

#[test]
fn only_staff_roles_pass_the_dashboard_gate() {
    let viewer = |role: Option<&str>| Viewer {
        user_name: Some("A".into()),
        role_name: role.map(str::to_string),
    };

    assert!(viewer(Some("administrator")).is_staff());
    assert!(viewer(Some("manager")).is_staff());
    assert!(!viewer(Some("customer")).is_staff());
    assert!(!Viewer::anonymous().is_staff());
    assert!(ensure_staff(&viewer(Some("customer"))).is_err());
    assert!(ensure_staff(&viewer(Some("manager"))).is_ok());
}

#[test]
fn route_category_overrides_the_form_filter() {
    let query = CategoryQuery {
        category: Some("tea".into()),
        tag: Some("christmas".into()),
    };

    assert_eq!(
        effective_filter("cf", &query),
        ProductFilter {
            category: Some("cf".into()),
            tag: Some("christmas".into()),
        }
    );
    assert_eq!(
        effective_filter("all", &query),
        ProductFilter {
            category: Some("tea".into()),
            tag: Some("christmas".into()),
        }
    );
}

#[test]
fn blank_form_filters_are_ignored() {
    let query = CategoryQuery {
        category: Some("".into()),
        tag: Some("".into()),
    };
    assert_eq!(effective_filter("all", &query), ProductFilter::default());
}

#[test]
fn only_the_all_category_has_a_banner() {
    assert_eq!(category_photo("all").map(|p| p.link), Some("4.png".to_string()));
    assert!(category_photo("cf").is_none());
}
