use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::validation::{
        self, Validated, ValidationError, ValidationReason, optional_text, required_text,
    },
    models::Category,
};

const MAX_ID_LEN: usize = 64;
const MAX_NAME_LEN: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 4000;
const MAX_TAG_LEN: usize = 64;

/// Product form as posted by the dashboard modal. `tags` is a comma separated
/// list, `sizes` a JSON array of `{size, price}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductFormInput {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub sizes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

/// Fields left as `None` are not touched by an update. `description` is
/// `Some(None)` when the form sent it blank, which clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeEntry {
    pub size: String,
    pub price: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Deserialize)]
struct RawSize {
    size: String,
    price: RawPrice,
}

pub fn validate_new_product(input: &ProductFormInput) -> Validated<NewProduct> {
    Ok(NewProduct {
        id: required_text("id", input.id.as_deref(), MAX_ID_LEN)?,
        name: required_text("name", input.name.as_deref(), MAX_NAME_LEN)?,
        category: match input.category.as_deref() {
            Some(raw) => category("category", raw)?,
            None => {
                return Err(ValidationError::new("category", ValidationReason::Missing));
            }
        },
        tags: input.tags.as_deref().map(parse_tags).transpose()?.unwrap_or_default(),
        description: description(input.description.as_deref())?,
    })
}

pub fn validate_product_patch(input: &ProductFormInput) -> Validated<ProductPatch> {
    Ok(ProductPatch {
        name: optional_text("name", input.name.as_deref(), MAX_NAME_LEN)?,
        category: input
            .category
            .as_deref()
            .map(|raw| category("category", raw))
            .transpose()?,
        tags: input.tags.as_deref().map(parse_tags).transpose()?,
        description: input
            .description
            .as_deref()
            .map(|raw| description(Some(raw)))
            .transpose()?,
    })
}

/// A blank description means "no description" rather than failing.
fn description(raw: Option<&str>) -> Validated<Option<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => optional_text("description", Some(text), MAX_DESCRIPTION_LEN),
    }
}

fn category(field: &'static str, raw: &str) -> Validated<Category> {
    raw.trim().parse::<Category>().map_err(|_| {
        ValidationError::new(field, ValidationReason::UnknownCategory(raw.to_string()))
    })
}

/// Splits `"best-seller, christmas"` into tag ids, dropping blanks and duplicates.
pub fn parse_tags(raw: &str) -> Validated<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if tag.chars().count() > MAX_TAG_LEN {
            return Err(ValidationError::new(
                "tags",
                ValidationReason::TooLong { max: MAX_TAG_LEN },
            ));
        }
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    Ok(tags)
}

/// Parses the `sizes` payload. Missing or malformed JSON yields no sizes; a
/// well-formed entry whose price is not a number is rejected.
pub fn parse_sizes(raw: Option<&str>) -> Validated<Vec<SizeEntry>> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(Vec::new());
    };
    let entries: Vec<RawSize> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(error = %err, "ignoring malformed sizes payload");
            return Ok(Vec::new());
        }
    };

    entries
        .into_iter()
        .map(|entry| {
            let price = match entry.price {
                RawPrice::Number(n) => validation::price("sizes", &n.to_string())?,
                RawPrice::Text(text) => validation::price("sizes", &text)?,
            };
            let size = required_text("sizes", Some(&entry.size), MAX_TAG_LEN)?;
            Ok(SizeEntry { size, price })
        })
        .collect()
}
