use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Category, Product, ProductItem, Specs};

/// Shared header data for every storefront page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoreLayout {
    pub active_nav: Option<String>,
    pub user_name: Option<String>,
    pub show_dashboard: bool,
    pub cart_count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Photo {
    pub link: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CtaButton {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CarouselSlide {
    pub photo: Photo,
    pub title: String,
    pub description: String,
    pub align: String,
    pub active: bool,
    pub cta_button: CtaButton,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryOption {
    pub value: Category,
    pub label: String,
}

impl CategoryOption {
    pub fn all() -> Vec<Self> {
        Category::ALL
            .into_iter()
            .map(|value| CategoryOption {
                value,
                label: value.label().to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub layout: StoreLayout,
    pub carousel_slides: Vec<CarouselSlide>,
    pub best_sellers: Vec<Product>,
    pub christmas: Vec<Product>,
    pub newest: Vec<Product>,
    pub most_sold: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPage {
    pub layout: StoreLayout,
    pub category: String,
    pub products: Vec<Product>,
    pub category_photo: Option<Photo>,
    pub categories: Vec<CategoryOption>,
    pub filtered_category: String,
    pub filtered_tag: Option<String>,
}

/// One spec and its selectable values, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SpecOption {
    pub name: String,
    pub values: Vec<String>,
}

/// Distinct spec values across a product's items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductOptions {
    #[schema(value_type = Vec<SpecOption>)]
    pub specs: Vec<SpecOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct VariantSelection {
    pub options: ProductOptions,
    pub selected_options: Specs,
    pub available_item: Option<ProductItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub layout: StoreLayout,
    pub product: Product,
    pub preview_image: String,
    #[serde(flatten)]
    pub selection: VariantSelection,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLine {
    pub item_id: i32,
    pub product_id: String,
    pub product_name: String,
    pub price: i64,
    pub specs: Specs,
    pub amount: u32,
    pub line_total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartPage {
    pub layout: StoreLayout,
    pub cart: Vec<CartLine>,
    pub total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlainPage {
    pub layout: StoreLayout,
}

/// Banner photos per route category; `all` is the only one configured.
pub fn category_photo(category: &str) -> Option<Photo> {
    match category {
        "all" => Some(Photo {
            link: "4.png".to_string(),
        }),
        _ => None,
    }
}
