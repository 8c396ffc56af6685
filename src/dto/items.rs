use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::validation::{self, Validated, ValidationError, ValidationReason, required_text},
    models::Specs,
};

/// Item form as posted by the dashboard item modal; `specs` is a JSON object.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemFormInput {
    pub product_id: Option<String>,
    pub price: Option<String>,
    pub specs: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub product_id: String,
    pub price: i64,
    pub specs: Specs,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub product_id: Option<String>,
    pub price: Option<i64>,
    pub specs: Option<Specs>,
}

pub fn validate_new_item(input: &ItemFormInput) -> Validated<NewItem> {
    Ok(NewItem {
        product_id: required_text("productId", input.product_id.as_deref(), 64)?,
        price: match input.price.as_deref() {
            Some(raw) => validation::price("price", raw)?,
            None => return Err(ValidationError::new("price", ValidationReason::Missing)),
        },
        specs: input.specs.as_deref().map(parse_specs).transpose()?.unwrap_or_default(),
    })
}

pub fn validate_item_patch(input: &ItemFormInput) -> Validated<ItemPatch> {
    Ok(ItemPatch {
        product_id: input
            .product_id
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| required_text("productId", Some(raw), 64))
            .transpose()?,
        price: input
            .price
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| validation::price("price", raw))
            .transpose()?,
        specs: input.specs.as_deref().map(parse_specs).transpose()?,
    })
}

/// `{"Size": "M"}`; names and values are trimmed and must be non-empty.
pub fn parse_specs(raw: &str) -> Validated<Specs> {
    let parsed: Specs = serde_json::from_str(raw).map_err(|err| {
        ValidationError::new("specs", ValidationReason::Malformed(err.to_string()))
    })?;

    let mut specs = Specs::new();
    for (name, value) in parsed {
        let name = required_text("specs", Some(&name), 64)?;
        let value = required_text("specs", Some(&value), 64)?;
        specs.insert(name, value);
    }
    Ok(specs)
}
