use std::{collections::HashMap, path::Path};

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    dto::store::{
        CarouselSlide, CartLine, CartPage, CategoryOption, CategoryPage, CtaButton, HomePage,
        Photo, PlainPage, ProductPage, StoreLayout, VariantSelection, category_photo,
    },
    entity::{Products, products},
    error::AppResult,
    middleware::auth::Viewer,
    models::{Item, Product, Specs},
    services::{
        item_service,
        product_service::{self, ProductFilter, all_item_specs},
    },
    session::Session,
    state::AppState,
};

const HOME_SECTION_SIZE: usize = 4;
const BEST_SELLER_TAG: &str = "best-seller";
const CHRISTMAS_TAG: &str = "christmas";
const PREVIEW_NOT_FOUND: &str = "/public/images/products/preview-notfound.jpg";

/// Form filters on the category page.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct CategoryQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// Resolves the spec values to show as selected and the item they pick.
///
/// A query value is honoured only when it is one of the spec's known values;
/// otherwise the spec's first value is used.
pub fn select_variant(product: &Product, query: &HashMap<String, String>) -> VariantSelection {
    let options = all_item_specs(product);

    let mut selected = Specs::new();
    for spec in &options.specs {
        let chosen = query
            .get(&spec.name)
            .filter(|value| spec.values.contains(value))
            .or_else(|| spec.values.first());
        if let Some(value) = chosen {
            selected.insert(spec.name.clone(), value.clone());
        }
    }

    let available_item = product
        .items
        .iter()
        .find(|item| {
            selected
                .iter()
                .all(|(name, value)| item.specs.get(name) == Some(value))
        })
        .cloned();

    VariantSelection {
        options,
        selected_options: selected,
        available_item,
    }
}

pub fn store_layout(viewer: &Viewer, active_nav: Option<String>, cart_count: usize) -> StoreLayout {
    StoreLayout {
        active_nav,
        user_name: viewer.user_name.clone(),
        show_dashboard: viewer.is_staff(),
        cart_count,
    }
}

// (photo, title, description, align, cta href, cta label)
const CAROUSEL: [(&str, &str, &str, &str, &str, &str); 3] = [
    (
        "1.png",
        "Welcome to 2Lane Coffee",
        "A cozy place for festive chats and brews.",
        "center",
        "#bestSellers",
        "Explore best-sellers!",
    ),
    (
        "2.png",
        "",
        "Warm flavors, sweet cakes, handcrafted with care.",
        "end",
        "/products/all",
        "Browse the menu",
    ),
    (
        "3.png",
        "Sweet treats & comfort",
        "Coffee, cakes and comfort in every cup.",
        "center",
        "/about",
        "Contact us",
    ),
];

/// The first slide starts active.
pub fn carousel_slides() -> Vec<CarouselSlide> {
    CAROUSEL
        .iter()
        .enumerate()
        .map(|(index, (link, title, description, align, href, label))| CarouselSlide {
            photo: Photo {
                link: link.to_string(),
            },
            title: title.to_string(),
            description: description.to_string(),
            align: align.to_string(),
            active: index == 0,
            cta_button: CtaButton {
                href: href.to_string(),
                label: label.to_string(),
            },
        })
        .collect()
}

pub async fn home_page(state: &AppState, viewer: &Viewer, session: &Session) -> AppResult<HomePage> {
    let all = product_service::list_products(&state.orm).await?;
    let best_sellers = all.iter().filter(|p| p.has_tag(BEST_SELLER_TAG)).cloned().collect();
    let christmas = all.iter().filter(|p| p.has_tag(CHRISTMAS_TAG)).cloned().collect();
    let newest = product_service::get_newest(&state.orm, HOME_SECTION_SIZE as u64).await?;
    let most_sold = product_service::get_most_sales(&state.orm, HOME_SECTION_SIZE).await?;

    Ok(HomePage {
        layout: store_layout(viewer, Some("/".into()), session.cart_count().await),
        carousel_slides: carousel_slides(),
        best_sellers,
        christmas,
        newest,
        most_sold,
    })
}

/// The route category wins over the form's `category` unless it is `all`.
pub fn effective_filter(route_category: &str, query: &CategoryQuery) -> ProductFilter {
    let category = if route_category != "all" {
        Some(route_category.to_string())
    } else {
        query.category.clone().filter(|c| !c.is_empty())
    };
    ProductFilter {
        category,
        tag: query.tag.clone().filter(|t| !t.is_empty()),
    }
}

pub async fn category_page(
    state: &AppState,
    viewer: &Viewer,
    session: &Session,
    route_category: &str,
    query: CategoryQuery,
) -> AppResult<CategoryPage> {
    let filter = effective_filter(route_category, &query);
    let products = product_service::list_filtered(&state.orm, &filter).await?;

    let active_nav = if route_category == "all" {
        "/products".to_string()
    } else {
        format!("/products/{route_category}")
    };

    Ok(CategoryPage {
        layout: store_layout(viewer, Some(active_nav), session.cart_count().await),
        category: route_category.to_string(),
        products,
        category_photo: category_photo(route_category),
        categories: CategoryOption::all(),
        filtered_category: query.category.unwrap_or_default(),
        filtered_tag: filter.tag,
    })
}

/// `None` when the product exists but belongs to a different category.
pub async fn product_page(
    state: &AppState,
    viewer: &Viewer,
    session: &Session,
    category: &str,
    product_id: &str,
    query: &HashMap<String, String>,
) -> AppResult<Option<ProductPage>> {
    let product = product_service::get_product(&state.orm, product_id).await?;
    if product.category != category {
        return Ok(None);
    }

    let preview_image = preview_image(&state.public_dir, &product.id).await;
    let selection = select_variant(&product, query);
    let active_nav = format!("/products/{}", product.category);

    Ok(Some(ProductPage {
        layout: store_layout(viewer, Some(active_nav), session.cart_count().await),
        product,
        preview_image,
        selection,
    }))
}

pub async fn preview_image(public_dir: &Path, product_id: &str) -> String {
    let file = public_dir
        .join("images")
        .join("products")
        .join(product_id)
        .join("preview.jpg");
    match tokio::fs::try_exists(&file).await {
        Ok(true) => format!("/public/images/products/{product_id}/preview.jpg"),
        _ => PREVIEW_NOT_FOUND.to_string(),
    }
}

/// Builds one line per item and the cart total. Amounts saturate instead of
/// overflowing.
pub fn price_cart_lines(
    items: Vec<Item>,
    quantities: &HashMap<i32, u32>,
    names: &HashMap<String, String>,
) -> (Vec<CartLine>, i64) {
    let lines: Vec<CartLine> = items
        .into_iter()
        .map(|item| {
            let amount = quantities.get(&item.id).copied().unwrap_or(0);
            CartLine {
                item_id: item.id,
                product_name: names.get(&item.product_id).cloned().unwrap_or_default(),
                product_id: item.product_id,
                price: item.price,
                specs: item.specs,
                amount,
                line_total: item.price.saturating_mul(i64::from(amount)),
            }
        })
        .collect();
    let total = lines
        .iter()
        .fold(0i64, |total, line| total.saturating_add(line.line_total));
    (lines, total)
}

/// Prices and names are read at render time, never frozen at add time.
pub async fn cart_page(state: &AppState, viewer: &Viewer, session: &Session) -> AppResult<CartPage> {
    let data = session.data().await;
    let cart = data.cart.unwrap_or_default();
    if cart.is_empty() {
        return Ok(CartPage {
            layout: store_layout(viewer, Some("/cart".into()), 0),
            cart: Vec::new(),
            total: 0,
        });
    }

    let quantities: HashMap<i32, u32> = cart.iter().collect();
    let items = item_service::get_items(&state.orm, quantities.keys().copied().collect()).await?;

    let product_ids: Vec<String> = items.iter().map(|item| item.product_id.clone()).collect();
    let names: HashMap<String, String> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        Products::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|product| (product.id, product.name))
            .collect()
    };

    if items.len() < quantities.len() {
        tracing::warn!(
            session = %session.id,
            missing = quantities.len() - items.len(),
            "cart references items that no longer exist"
        );
    }

    let (lines, total) = price_cart_lines(items, &quantities, &names);

    Ok(CartPage {
        layout: store_layout(viewer, Some("/cart".into()), cart.count()),
        cart: lines,
        total,
    })
}

pub async fn plain_page(viewer: &Viewer, session: &Session, active_nav: Option<&str>) -> PlainPage {
    PlainPage {
        layout: store_layout(viewer, active_nav.map(str::to_string), session.cart_count().await),
    }
}
