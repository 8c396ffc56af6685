use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::store::{CategoryPage, HomePage, PlainPage, ProductPage},
    error::AppResult,
    middleware::auth::Viewer,
    response::{ApiResponse, Meta, Page},
    services::store_service::{self, CategoryQuery},
    session::Session,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/products", get(all_products))
        .route("/products/{category}", get(category))
        .route("/products/{category}/{product_id}", get(product))
        .route("/about", get(about))
        .route("/404", get(not_found_page))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page", body = ApiResponse<HomePage>)
    ),
    tag = "Store"
)]
pub async fn home(
    State(state): State<AppState>,
    viewer: Viewer,
    session: Session,
) -> AppResult<Json<ApiResponse<HomePage>>> {
    let page = store_service::home_page(&state, &viewer, &session).await?;
    Ok(Json(ApiResponse::success("Home", page, Some(Meta::empty()))))
}

pub async fn all_products(
    state: State<AppState>,
    viewer: Viewer,
    session: Session,
    query: Query<CategoryQuery>,
) -> AppResult<Json<ApiResponse<CategoryPage>>> {
    category(state, viewer, session, Path("all".to_string()), query).await
}

#[utoipa::path(
    get,
    path = "/products/{category}",
    params(
        ("category" = String, Path, description = "Category code or `all`"),
        CategoryQuery
    ),
    responses(
        (status = 200, description = "Category listing", body = ApiResponse<CategoryPage>)
    ),
    tag = "Store"
)]
pub async fn category(
    State(state): State<AppState>,
    viewer: Viewer,
    session: Session,
    Path(category): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<ApiResponse<CategoryPage>>> {
    let page = store_service::category_page(&state, &viewer, &session, &category, query).await?;
    let meta = Meta::total(page.products.len());
    Ok(Json(ApiResponse::success("Products", page, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/products/{category}/{product_id}",
    params(
        ("category" = String, Path, description = "Category code"),
        ("product_id" = String, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Product detail with variant selection", body = ApiResponse<ProductPage>),
        (status = 303, description = "Category mismatch, redirected to /404"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Store"
)]
pub async fn product(
    State(state): State<AppState>,
    viewer: Viewer,
    session: Session,
    Path((category, product_id)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> AppResult<Page<ProductPage>> {
    let page =
        store_service::product_page(&state, &viewer, &session, &category, &product_id, &query)
            .await?;
    Ok(match page {
        Some(page) => Page::Render(ApiResponse::success("Product", page, None)),
        None => Page::Redirect("/404"),
    })
}

pub async fn about(viewer: Viewer, session: Session) -> Json<ApiResponse<PlainPage>> {
    let page = store_service::plain_page(&viewer, &session, Some("/about")).await;
    Json(ApiResponse::success("About", page, None))
}

pub async fn not_found_page(viewer: Viewer, session: Session) -> Json<ApiResponse<PlainPage>> {
    let page = store_service::plain_page(&viewer, &session, None).await;
    Json(ApiResponse::success("Not Found", page, None))
}
