use crate::{
    dto::{
        dashboard::{
            DashboardHome, DashboardLayout, DashboardProductRow, ItemEditForm, ProductEditForm,
            ProductsPage, RecordView, RecordsPage, UsersPage,
        },
        items::{ItemFormInput, validate_item_patch, validate_new_item},
        products::{ProductFormInput, parse_sizes, validate_new_product, validate_product_patch},
        store::CategoryOption,
    },
    error::{AppError, AppResult},
    middleware::auth::Viewer,
    models::{Item, Product},
    response::{ApiResponse, Meta, Page},
    services::{item_service, product_service, record_service, user_service},
    state::AppState,
};

pub const PRODUCTS_PATH: &str = "/dashboard/products";

pub fn dashboard_layout(viewer: &Viewer, active_nav: &str) -> DashboardLayout {
    DashboardLayout {
        active_nav: active_nav.to_string(),
        user_name: viewer.user_name.clone(),
        role_name: viewer.role_name.clone(),
    }
}

pub fn home(viewer: &Viewer) -> DashboardHome {
    DashboardHome {
        layout: dashboard_layout(viewer, "/"),
    }
}

pub fn product_row(product: Product) -> DashboardProductRow {
    DashboardProductRow {
        options: product_service::all_item_specs(&product),
        edit_form: ProductEditForm::from_product(&product),
        item_forms: product
            .items
            .iter()
            .map(|item| ItemEditForm::from_item(&product.id, item))
            .collect(),
        new_item_form: ItemEditForm::new_for(&product.id),
        product,
    }
}

pub async fn products_page(
    state: &AppState,
    viewer: &Viewer,
    error_msg: Option<String>,
) -> AppResult<ProductsPage> {
    let products = product_service::list_products(&state.orm).await?;
    Ok(ProductsPage {
        layout: dashboard_layout(viewer, "/products"),
        products: products.into_iter().map(product_row).collect(),
        categories: CategoryOption::all(),
        new_product_form: ProductEditForm::blank(),
        error_msg,
    })
}

/// Creates the product, or re-renders the list with an inline message when
/// its id or name is taken. Other failures propagate.
pub async fn add_product(
    state: &AppState,
    viewer: &Viewer,
    input: ProductFormInput,
) -> AppResult<Page<ProductsPage>> {
    let new = validate_new_product(&input)?;
    let sizes = parse_sizes(input.sizes.as_deref())?;

    match product_service::create_product(&state.orm, new, &sizes).await {
        Ok(_) => Ok(Page::Redirect(PRODUCTS_PATH)),
        Err(AppError::Conflict(field)) => {
            tracing::warn!(?field, "product create rejected by unique constraint");
            let page = products_page(state, viewer, Some(field.message().to_string())).await?;
            Ok(Page::Render(ApiResponse::success(
                "Products",
                page,
                Some(Meta::empty()),
            )))
        }
        Err(err) => Err(err),
    }
}

/// The product id comes from the form body, falling back to `?id=`. Without
/// one the request just returns to the list.
pub async fn update_product(
    state: &AppState,
    input: ProductFormInput,
    query_id: Option<String>,
) -> AppResult<Option<Product>> {
    let id = input
        .id
        .clone()
        .or(query_id)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    let patch = validate_product_patch(&input)?;
    let Some(id) = id else {
        return Ok(None);
    };
    let sizes = parse_sizes(input.sizes.as_deref())?;

    product_service::update_product(&state.orm, &id, patch, &sizes)
        .await
        .map(Some)
}

pub async fn add_item(state: &AppState, input: ItemFormInput) -> AppResult<Item> {
    let new = validate_new_item(&input)?;
    item_service::add_item(&state.orm, new).await
}

pub async fn update_item(state: &AppState, id: i32, input: ItemFormInput) -> AppResult<Item> {
    let patch = validate_item_patch(&input)?;
    item_service::update_item(&state.orm, id, patch).await
}

pub async fn users_page(state: &AppState, viewer: &Viewer) -> AppResult<UsersPage> {
    Ok(UsersPage {
        layout: dashboard_layout(viewer, "/users"),
        users: user_service::list_visible_users(&state.orm).await?,
    })
}

pub async fn records_page(state: &AppState, viewer: &Viewer) -> AppResult<RecordsPage> {
    let records = record_service::list_records(&state.orm).await?;
    Ok(RecordsPage {
        layout: dashboard_layout(viewer, "/records"),
        records: records.into_iter().map(RecordView::from_record).collect(),
    })
}
