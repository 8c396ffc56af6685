use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// `?id=<item id>` on every cart mutation.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CartItemQuery {
    pub id: i32,
}
