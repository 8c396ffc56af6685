use std::{collections::HashMap, time::Duration};

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use coffee_storefront::{
    models::{Item, Specs},
    services::{cart_service, store_service::price_cart_lines},
    session::{Cart, Session, SessionStore, session_id_from_headers},
};
use uuid::Uuid;

#[test]
fn count_is_distinct_items_not_quantity() {
    let mut cart = Cart::new();
    cart.add(5);
    cart.add(7);
    cart.add(7);
    cart.add(7);

    assert_eq!(cart.count(), 2);
    assert_eq!(cart.quantity(5), 1);
    assert_eq!(cart.quantity(7), 3);
}

#[test]
fn subtract_at_one_removes_the_entry() {
    let mut cart = Cart::new();
    cart.add(5);
    cart.add(9);

    cart.subtract(5);

    assert_eq!(cart.quantity(5), 0);
    assert_eq!(cart.count(), 1);
    assert!(cart.iter().all(|(id, _)| id != 5));
}

#[test]
fn subtract_on_absent_entry_is_a_noop() {
    let mut cart = Cart::new();
    cart.add(1);
    let before = cart.clone();

    cart.subtract(42);

    assert_eq!(cart, before);
}

#[test]
fn subtract_keeps_entry_above_one() {
    let mut cart = Cart::new();
    cart.add(3);
    cart.add(3);

    cart.subtract(3);
    assert_eq!(cart.quantity(3), 1);
    assert_eq!(cart.count(), 1);
}

#[test]
fn remove_and_empty() {
    let mut cart = Cart::new();
    cart.add(1);
    cart.add(1);
    cart.add(2);

    cart.remove(1);
    assert_eq!(cart.count(), 1);
    cart.remove(1);
    assert_eq!(cart.count(), 1);

    cart.empty();
    assert!(cart.is_empty());
    assert_eq!(cart.count(), 0);
}

#[test]
fn cart_serializes_as_a_plain_map() {
    let mut cart = Cart::new();
    cart.add(4);
    cart.add(4);

    let json = serde_json::to_value(&cart).unwrap();
    assert_eq!(json, serde_json::json!({ "4": 2 }));
}

#[tokio::test]
async fn cart_is_created_lazily_per_session() {
    let store = SessionStore::default();
    let id = Uuid::new_v4();

    let fresh = store.load(id).await;
    assert!(fresh.cart.is_none());
    assert_eq!(fresh.cart_count(), 0);

    store
        .update(id, |data| data.cart.get_or_insert_with(Cart::new).add(11))
        .await;
    let loaded = store.load(id).await;
    assert_eq!(loaded.cart_count(), 1);

    let other = store.load(Uuid::new_v4()).await;
    assert!(other.cart.is_none());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn cart_mutations_without_a_cart_store_nothing() {
    let store = SessionStore::default();

    for _ in 0..100 {
        let session = Session::new(Uuid::new_v4(), store.clone());
        cart_service::subtract_item(&session, 1).await;
        cart_service::remove_item(&session, 1).await;
        cart_service::empty_cart(&session).await;
        assert_eq!(session.cart_count().await, 0);
    }

    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn update_existing_leaves_unknown_sessions_alone() {
    let store = SessionStore::default();
    let id = Uuid::new_v4();

    assert_eq!(store.update_existing(id, |data| data.cart_count()).await, None);
    assert_eq!(store.len().await, 0);

    store
        .update(id, |data| data.cart.get_or_insert_with(Cart::new).add(3))
        .await;
    assert_eq!(store.update_existing(id, |data| data.cart_count()).await, Some(1));
}

#[tokio::test]
async fn idle_sessions_are_swept() {
    let expiring = SessionStore::with_ttl(Duration::ZERO);
    expiring
        .update(Uuid::new_v4(), |data| data.cart.get_or_insert_with(Cart::new).add(1))
        .await;
    assert_eq!(expiring.sweep().await, 1);
    assert_eq!(expiring.len().await, 0);

    let lasting = SessionStore::with_ttl(Duration::from_secs(3600));
    lasting
        .update(Uuid::new_v4(), |data| data.cart.get_or_insert_with(Cart::new).add(1))
        .await;
    assert_eq!(lasting.sweep().await, 0);
    assert_eq!(lasting.len().await, 1);
}

#[test]
fn cart_totals_saturate_instead_of_overflowing() {
    let items = vec![
        Item {
            id: 1,
            product_id: "cf-latte".into(),
            price: i64::MAX / 2 + 1,
            specs: Specs::new(),
        },
        Item {
            id: 2,
            product_id: "cf-latte".into(),
            price: 35000,
            specs: Specs::new(),
        },
    ];
    let quantities = HashMap::from([(1, 2), (2, 3)]);
    let names = HashMap::from([("cf-latte".to_string(), "Caramel Latte".to_string())]);

    let (lines, total) = price_cart_lines(items, &quantities, &names);

    assert_eq!(lines[0].line_total, i64::MAX);
    assert_eq!(lines[1].line_total, 105000);
    assert_eq!(lines[1].product_name, "Caramel Latte");
    assert_eq!(total, i64::MAX);
}

#[test]
fn session_id_is_read_from_the_cookie_header() {
    let id = Uuid::new_v4();
    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("theme=dark; sid={id}; lang=vi")).unwrap(),
    );

    assert_eq!(session_id_from_headers(&headers), Some(id));
}

#[test]
fn malformed_session_cookie_is_ignored() {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static("sid=not-a-uuid"));
    assert_eq!(session_id_from_headers(&headers), None);
    assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
}
