use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::CartItemQuery,
        dashboard::{
            DashboardLayout, DashboardProductRow, ItemEditForm, ProductEditForm, ProductsPage,
            RecordView, RecordsPage, SizeField, UsersPage,
        },
        items::ItemFormInput,
        products::ProductFormInput,
        store::{
            CarouselSlide, CartLine, CartPage, CategoryOption, CategoryPage, CtaButton, HomePage,
            Photo, ProductOptions, ProductPage, SpecOption, StoreLayout, VariantSelection,
        },
    },
    models::{Category, Item, Product, ProductItem, Record, RecordLine, User},
    response::{ApiResponse, Meta},
    routes::{cart, dashboard, health, store},
    services::store_service::CategoryQuery,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        store::home,
        store::category,
        store::product,
        cart::cart_page,
        cart::add_to_cart,
        cart::subtract_from_cart,
        cart::remove_from_cart,
        cart::empty_cart,
        dashboard::products,
        dashboard::add_item,
        dashboard::update_item,
        dashboard::add_product,
        dashboard::update_product,
        dashboard::users,
        dashboard::records
    ),
    components(
        schemas(
            Category,
            Product,
            ProductItem,
            Item,
            User,
            Record,
            RecordLine,
            StoreLayout,
            Photo,
            CtaButton,
            CarouselSlide,
            CategoryOption,
            SpecOption,
            ProductOptions,
            VariantSelection,
            HomePage,
            CategoryPage,
            ProductPage,
            CartLine,
            CartPage,
            CartItemQuery,
            CategoryQuery,
            DashboardLayout,
            SizeField,
            ProductEditForm,
            ItemEditForm,
            DashboardProductRow,
            ProductsPage,
            UsersPage,
            RecordView,
            RecordsPage,
            ProductFormInput,
            ItemFormInput,
            Meta,
            ApiResponse<HomePage>,
            ApiResponse<CategoryPage>,
            ApiResponse<ProductPage>,
            ApiResponse<CartPage>,
            ApiResponse<ProductsPage>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Store", description = "Storefront pages"),
        (name = "Cart", description = "Session cart"),
        (name = "Dashboard", description = "Product, user and record management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
