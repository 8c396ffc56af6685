use axum::{
    Json, Router,
    extract::{Query, State},
    response::Redirect,
    routing::get,
};

use crate::{
    dto::{cart::CartItemQuery, store::CartPage},
    error::AppResult,
    middleware::auth::Viewer,
    response::{ApiResponse, Meta},
    services::{cart_service, store_service},
    session::Session,
    state::AppState,
};

const CART_PATH: &str = "/cart";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_page))
        .route("/add", get(add_to_cart).post(add_to_cart))
        .route("/subtract", get(subtract_from_cart).post(subtract_from_cart))
        .route("/remove", get(remove_from_cart).post(remove_from_cart))
        .route("/empty", get(empty_cart).post(empty_cart))
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Cart lines priced at render time", body = ApiResponse<CartPage>)
    ),
    tag = "Cart"
)]
pub async fn cart_page(
    State(state): State<AppState>,
    viewer: Viewer,
    session: Session,
) -> AppResult<Json<ApiResponse<CartPage>>> {
    let page = store_service::cart_page(&state, &viewer, &session).await?;
    let meta = Meta::total(page.cart.len());
    Ok(Json(ApiResponse::success("Cart", page, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/cart/add",
    params(CartItemQuery),
    responses(
        (status = 303, description = "Item added, redirected to /cart"),
        (status = 404, description = "Item not found"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CartItemQuery>,
) -> AppResult<Redirect> {
    cart_service::add_item(&state, &session, query.id).await?;
    Ok(Redirect::to(CART_PATH))
}

#[utoipa::path(
    post,
    path = "/cart/subtract",
    params(CartItemQuery),
    responses((status = 303, description = "Redirected to /cart")),
    tag = "Cart"
)]
pub async fn subtract_from_cart(session: Session, Query(query): Query<CartItemQuery>) -> Redirect {
    cart_service::subtract_item(&session, query.id).await;
    Redirect::to(CART_PATH)
}

#[utoipa::path(
    post,
    path = "/cart/remove",
    params(CartItemQuery),
    responses((status = 303, description = "Redirected to /cart")),
    tag = "Cart"
)]
pub async fn remove_from_cart(session: Session, Query(query): Query<CartItemQuery>) -> Redirect {
    cart_service::remove_item(&session, query.id).await;
    Redirect::to(CART_PATH)
}

#[utoipa::path(
    post,
    path = "/cart/empty",
    responses((status = 303, description = "Redirected to /cart")),
    tag = "Cart"
)]
pub async fn empty_cart(session: Session) -> Redirect {
    cart_service::empty_cart(&session).await;
    Redirect::to(CART_PATH)
}
