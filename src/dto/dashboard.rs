use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::store::{CategoryOption, ProductOptions},
    models::{Product, ProductItem, Record, RecordLine, SIZE_SPEC, Specs, User},
};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardLayout {
    pub active_nav: String,
    pub user_name: Option<String>,
    pub role_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardHome {
    pub layout: DashboardLayout,
}

/// One `{size, price}` row of the product modal's size editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SizeField {
    pub size: String,
    pub price: String,
}

/// Prefilled values for the product edit modal.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductEditForm {
    pub action: String,
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub tags_str: String,
    pub sizes: Vec<SizeField>,
}

impl ProductEditForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            action: format!("/dashboard/products/update-product?id={}", product.id),
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone().unwrap_or_default(),
            tags_str: product.tags.join(","),
            sizes: product
                .items
                .iter()
                .map(|item| SizeField {
                    size: item.specs.get(SIZE_SPEC).cloned().unwrap_or_default(),
                    price: item.price.to_string(),
                })
                .collect(),
        }
    }

    pub fn blank() -> Self {
        Self {
            action: "/dashboard/products/add-product".to_string(),
            id: String::new(),
            name: String::new(),
            category: String::new(),
            description: String::new(),
            tags_str: String::new(),
            sizes: Vec::new(),
        }
    }
}

/// Prefilled values for the item edit modal.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemEditForm {
    pub action: String,
    pub id: Option<i32>,
    pub product_id: String,
    pub price: String,
    pub specs: Specs,
}

impl ItemEditForm {
    pub fn from_item(product_id: &str, item: &ProductItem) -> Self {
        Self {
            action: format!("/dashboard/products/update-item?id={}", item.id),
            id: Some(item.id),
            product_id: product_id.to_string(),
            price: item.price.to_string(),
            specs: item.specs.clone(),
        }
    }

    pub fn new_for(product_id: &str) -> Self {
        Self {
            action: "/dashboard/products/add-item".to_string(),
            id: None,
            product_id: product_id.to_string(),
            price: String::new(),
            specs: Specs::new(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardProductRow {
    pub product: Product,
    pub options: ProductOptions,
    pub edit_form: ProductEditForm,
    pub item_forms: Vec<ItemEditForm>,
    pub new_item_form: ItemEditForm,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductsPage {
    pub layout: DashboardLayout,
    pub products: Vec<DashboardProductRow>,
    pub categories: Vec<CategoryOption>,
    pub new_product_form: ProductEditForm,
    pub error_msg: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersPage {
    pub layout: DashboardLayout,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecordView {
    /// 64-bit ids are rendered as strings.
    pub id: String,
    pub user_id: Option<i32>,
    pub status: String,
    pub created_at_iso: String,
    pub created_at_formatted: String,
    pub items: Vec<RecordLine>,
    pub items_json: String,
}

impl RecordView {
    pub fn from_record(record: Record) -> Self {
        let items_json = serde_json::to_string(&record.items).unwrap_or_else(|_| "[]".into());
        Self {
            id: record.id.to_string(),
            user_id: record.user_id,
            status: record.status,
            created_at_iso: record
                .created_at
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            created_at_formatted: record.created_at.format("%d/%m/%Y").to_string(),
            items: record.items,
            items_json,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecordsPage {
    pub layout: DashboardLayout,
    pub records: Vec<RecordView>,
}
