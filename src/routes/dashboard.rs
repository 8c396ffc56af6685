use axum::{
    Form, Json, Router,
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    dto::{
        dashboard::{DashboardHome, ProductsPage, RecordsPage, UsersPage},
        items::ItemFormInput,
        products::ProductFormInput,
    },
    error::AppResult,
    middleware::auth::StaffUser,
    response::{ApiResponse, Meta, Page},
    services::dashboard_service::{self, PRODUCTS_PATH},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ItemIdQuery {
    pub id: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ProductIdQuery {
    pub id: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_home))
        .route("/products", get(products))
        .route("/products/add-item", post(add_item))
        .route("/products/update-item", post(update_item))
        .route("/products/add-product", post(add_product))
        .route("/products/update-product", post(update_product))
        .route("/users", get(users))
        .route("/records", get(records))
}

pub async fn dashboard_home(StaffUser(viewer): StaffUser) -> Json<ApiResponse<DashboardHome>> {
    Json(ApiResponse::success(
        "Dashboard",
        dashboard_service::home(&viewer),
        None,
    ))
}

#[utoipa::path(
    get,
    path = "/dashboard/products",
    responses(
        (status = 200, description = "Product management list", body = ApiResponse<ProductsPage>),
        (status = 403, description = "Not a staff role"),
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn products(
    State(state): State<AppState>,
    StaffUser(viewer): StaffUser,
) -> AppResult<Json<ApiResponse<ProductsPage>>> {
    let page = dashboard_service::products_page(&state, &viewer, None).await?;
    let meta = Meta::total(page.products.len());
    Ok(Json(ApiResponse::success("Products", page, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/dashboard/products/add-item",
    request_body(content = ItemFormInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirected to the product list"),
        (status = 400, description = "Invalid input"),
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn add_item(
    State(state): State<AppState>,
    StaffUser(_viewer): StaffUser,
    Form(input): Form<ItemFormInput>,
) -> AppResult<Redirect> {
    dashboard_service::add_item(&state, input).await?;
    Ok(Redirect::to(PRODUCTS_PATH))
}

#[utoipa::path(
    post,
    path = "/dashboard/products/update-item",
    params(ItemIdQuery),
    request_body(content = ItemFormInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirected to the product list"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn update_item(
    State(state): State<AppState>,
    StaffUser(_viewer): StaffUser,
    Query(query): Query<ItemIdQuery>,
    Form(input): Form<ItemFormInput>,
) -> AppResult<Redirect> {
    dashboard_service::update_item(&state, query.id, input).await?;
    Ok(Redirect::to(PRODUCTS_PATH))
}

#[utoipa::path(
    post,
    path = "/dashboard/products/add-product",
    request_body(content = ProductFormInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirected to the product list"),
        (status = 200, description = "Id or name taken; list re-rendered with error_msg", body = ApiResponse<ProductsPage>),
        (status = 400, description = "Invalid input"),
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn add_product(
    State(state): State<AppState>,
    StaffUser(viewer): StaffUser,
    Form(input): Form<ProductFormInput>,
) -> AppResult<Page<ProductsPage>> {
    dashboard_service::add_product(&state, &viewer, input).await
}

#[utoipa::path(
    post,
    path = "/dashboard/products/update-product",
    params(ProductIdQuery),
    request_body(content = ProductFormInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirected to the product list"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn update_product(
    State(state): State<AppState>,
    StaffUser(_viewer): StaffUser,
    Query(query): Query<ProductIdQuery>,
    Form(input): Form<ProductFormInput>,
) -> AppResult<Redirect> {
    dashboard_service::update_product(&state, input, query.id).await?;
    Ok(Redirect::to(PRODUCTS_PATH))
}

#[utoipa::path(
    get,
    path = "/dashboard/users",
    responses(
        (status = 200, description = "Users with their role names", body = ApiResponse<UsersPage>)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn users(
    State(state): State<AppState>,
    StaffUser(viewer): StaffUser,
) -> AppResult<Json<ApiResponse<UsersPage>>> {
    let page = dashboard_service::users_page(&state, &viewer).await?;
    let meta = Meta::total(page.users.len());
    Ok(Json(ApiResponse::success("Users", page, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/dashboard/records",
    responses(
        (status = 200, description = "Order records with their lines", body = ApiResponse<RecordsPage>)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn records(
    State(state): State<AppState>,
    StaffUser(viewer): StaffUser,
) -> AppResult<Json<ApiResponse<RecordsPage>>> {
    let page = dashboard_service::records_page(&state, &viewer).await?;
    let meta = Meta::total(page.records.len());
    Ok(Json(ApiResponse::success("Records", page, Some(meta))))
}
