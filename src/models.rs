use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Spec name to value, e.g. `{"Size": "M"}`. One item is one combination.
pub type Specs = BTreeMap<String, String>;

/// Spec created for every entry of the dashboard's size editor.
pub const SIZE_SPEC: &str = "Size";

/// Record status counted as a completed sale.
pub const SALE_STATUS: &str = "success";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cf,
    Tea,
    Ice,
    Bread,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Cf, Category::Tea, Category::Ice, Category::Bread];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cf => "cf",
            Category::Tea => "tea",
            Category::Ice => "ice",
            Category::Bread => "bread",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Cf => "Coffee",
            Category::Tea => "Tea",
            Category::Ice => "Ice",
            Category::Bread => "Bread",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(())
    }
}

/// A purchasable variant as seen outside its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i32,
    pub product_id: String,
    pub price: i64,
    pub specs: Specs,
}

/// A variant embedded in its product; the product id is implied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductItem {
    pub id: i32,
    pub price: i64,
    pub specs: Specs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Category code as stored; see [`Category`].
    pub category: String,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ProductItem>,
}

impl Product {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

// Raw shapes as loaded from the database, before flattening.

#[derive(Debug, Clone, PartialEq)]
pub struct TagRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecValueRecord {
    pub spec: SpecName,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub id: i32,
    pub product_id: String,
    pub price: i64,
    pub specs: Vec<SpecValueRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub tags: Vec<TagRef>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ItemRecord>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordLine {
    pub item_id: Option<i32>,
    pub amount: i32,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: i64,
    pub user_id: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<RecordLine>,
}
