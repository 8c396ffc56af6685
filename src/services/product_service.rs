use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, TransactionTrait,
    sea_query::{Expr, OnConflict, Query},
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    db::{OrmConn, unique_conflict},
    dto::{
        products::{NewProduct, ProductPatch, SizeEntry},
        store::{ProductOptions, SpecOption},
    },
    entity::{
        Items, ProductTags, Products, RecordItems, Records, Tags, item_specs, items,
        product_tags,
        products::{ActiveModel, Column, Model as ProductModel},
        record_items, records, tags,
    },
    error::{AppError, AppResult},
    models::{
        Item, ItemRecord, Product, ProductItem, ProductRecord, SALE_STATUS, SpecName,
        SpecValueRecord, Specs, TagRef,
    },
    services::item_service,
};

/// Optional narrowing for [`list_filtered`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// Flattens a loaded product into its public shape.
pub fn product_from_record(record: ProductRecord) -> Product {
    Product {
        id: record.id,
        name: record.name,
        category: record.category,
        tags: record.tags.into_iter().map(|tag| tag.id).collect(),
        description: record.description,
        created_at: record.created_at,
        items: record
            .items
            .into_iter()
            .map(|item| ProductItem {
                id: item.id,
                price: item.price,
                specs: specs_from_records(item.specs),
            })
            .collect(),
    }
}

pub fn item_from_record(record: ItemRecord) -> Item {
    Item {
        id: record.id,
        product_id: record.product_id,
        price: record.price,
        specs: specs_from_records(record.specs),
    }
}

fn specs_from_records(specs: Vec<SpecValueRecord>) -> Specs {
    specs
        .into_iter()
        .map(|spec| (spec.spec.name, spec.value))
        .collect()
}

/// Every spec name used by the product's items, with its distinct values.
///
/// Items are visited in ascending id order and the spec names of one item in
/// lexical order; values keep the order in which they were first seen. The
/// first value of each spec is therefore the one of the oldest item carrying it.
pub fn all_item_specs(product: &Product) -> ProductOptions {
    let mut items: Vec<&ProductItem> = product.items.iter().collect();
    items.sort_by_key(|item| item.id);

    let mut options = ProductOptions::default();
    for item in items {
        for (name, value) in &item.specs {
            match options.specs.iter_mut().find(|spec| &spec.name == name) {
                Some(spec) => {
                    if !spec.values.contains(value) {
                        spec.values.push(value.clone());
                    }
                }
                None => options.specs.push(SpecOption {
                    name: name.clone(),
                    values: vec![value.clone()],
                }),
            }
        }
    }
    options
}

/// Orders products by summed sales of their items, descending. Ties go to the
/// newer product, then to the lower id.
pub fn rank_by_sales(products: Vec<Product>, sales: &HashMap<i32, i64>, take: usize) -> Vec<Product> {
    let mut ranked: Vec<(i64, Product)> = products
        .into_iter()
        .map(|product| {
            let total = product
                .items
                .iter()
                .map(|item| sales.get(&item.id).copied().unwrap_or(0))
                .sum();
            (total, product)
        })
        .collect();

    ranked.sort_by(|(a_sales, a), (b_sales, b)| {
        (Reverse(*a_sales), Reverse(a.created_at), &a.id).cmp(&(
            Reverse(*b_sales),
            Reverse(b.created_at),
            &b.id,
        ))
    });

    ranked
        .into_iter()
        .take(take)
        .map(|(_, product)| product)
        .collect()
}

pub async fn list_products<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<Product>> {
    let models = Products::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(conn)
        .await?;
    shape_all(conn, models).await
}

pub async fn list_filtered<C: ConnectionTrait>(
    conn: &C,
    filter: &ProductFilter,
) -> AppResult<Vec<Product>> {
    let mut finder = Products::find();

    if let Some(category) = filter.category.as_ref().filter(|c| !c.is_empty()) {
        finder = finder.filter(Column::Category.eq(category.clone()));
    }

    if let Some(tag) = filter.tag.as_ref().filter(|t| !t.is_empty()) {
        finder = finder.filter(
            Column::Id.in_subquery(
                Query::select()
                    .column(product_tags::Column::ProductId)
                    .from(ProductTags)
                    .and_where(product_tags::Column::TagId.eq(tag.clone()))
                    .to_owned(),
            ),
        );
    }

    let models = finder
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(conn)
        .await?;
    shape_all(conn, models).await
}

pub async fn get_product<C: ConnectionTrait>(conn: &C, id: &str) -> AppResult<Product> {
    let model = Products::find_by_id(id.to_string()).one(conn).await?;
    let model = match model {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    shape_all(conn, vec![model])
        .await?
        .pop()
        .ok_or(AppError::NotFound)
}

pub async fn get_newest<C: ConnectionTrait>(conn: &C, take: u64) -> AppResult<Vec<Product>> {
    let models = Products::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .limit(take)
        .all(conn)
        .await?;
    shape_all(conn, models).await
}

/// Completed sales per item: `(item_id, sales)`. Both tables have an `id`
/// column, so the count is table-qualified.
pub fn sales_per_item() -> Select<RecordItems> {
    RecordItems::find()
        .select_only()
        .column(record_items::Column::ItemId)
        .column_as(Expr::col((RecordItems, record_items::Column::Id)).count(), "sales")
        .inner_join(Records)
        .filter(records::Column::Status.eq(SALE_STATUS))
        .filter(record_items::Column::ItemId.is_not_null())
        .group_by(record_items::Column::ItemId)
}

pub async fn get_most_sales<C: ConnectionTrait>(conn: &C, take: usize) -> AppResult<Vec<Product>> {
    let rows: Vec<(Option<i32>, i64)> = sales_per_item().into_tuple().all(conn).await?;

    let sales: HashMap<i32, i64> = rows
        .into_iter()
        .filter_map(|(item_id, count)| item_id.map(|id| (id, count)))
        .collect();

    let products = list_products(conn).await?;
    Ok(rank_by_sales(products, &sales, take))
}

/// Creates the product, its tags and one `Size` item per entry in a single
/// transaction. A unique violation on the product row becomes [`AppError::Conflict`].
pub async fn create_product(
    orm: &OrmConn,
    new: NewProduct,
    sizes: &[SizeEntry],
) -> AppResult<Product> {
    let txn = orm.begin().await?;

    let active = ActiveModel {
        id: Set(new.id.clone()),
        name: Set(new.name),
        category: Set(new.category.as_str().to_string()),
        description: Set(new.description),
        created_at: NotSet,
    };
    let product = match active.insert(&txn).await {
        Ok(product) => product,
        Err(err) => {
            return Err(match unique_conflict(&err) {
                Some(field) => AppError::Conflict(field),
                None => AppError::OrmError(err),
            });
        }
    };

    connect_tags(&txn, &product.id, &new.tags).await?;
    item_service::replace_for_product(&txn, &product.id, sizes).await?;

    let created = get_product(&txn, &product.id).await?;
    txn.commit().await?;

    tracing::info!(product_id = %created.id, items = created.items.len(), "product created");
    Ok(created)
}

/// Applies the patch, connects any new tags and replaces every item of the
/// product with `sizes`, atomically.
pub async fn update_product(
    orm: &OrmConn,
    id: &str,
    patch: ProductPatch,
    sizes: &[SizeEntry],
) -> AppResult<Product> {
    let txn = orm.begin().await?;

    let existing = Products::find_by_id(id.to_string()).one(&txn).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(category) = patch.category {
        active.category = Set(category.as_str().to_string());
    }
    if let Some(description) = patch.description {
        active.description = Set(description);
    }
    if active.is_changed() {
        active.update(&txn).await?;
    }

    if let Some(tags) = patch.tags.as_deref() {
        connect_tags(&txn, id, tags).await?;
    }

    let removed = item_service::replace_for_product(&txn, id, sizes).await?;

    let updated = get_product(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(
        product_id = %id,
        removed_items = removed,
        items = updated.items.len(),
        "product updated"
    );
    Ok(updated)
}

/// Links the product to each tag, creating tags that do not exist yet.
/// Existing links are kept.
pub async fn connect_tags<C: ConnectionTrait>(
    conn: &C,
    product_id: &str,
    tag_ids: &[String],
) -> AppResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    Tags::insert_many(tag_ids.iter().map(|tag| tags::ActiveModel {
        id: Set(tag.clone()),
    }))
    .on_conflict(OnConflict::column(tags::Column::Id).do_nothing().to_owned())
    .do_nothing()
    .exec(conn)
    .await?;

    ProductTags::insert_many(tag_ids.iter().map(|tag| product_tags::ActiveModel {
        product_id: Set(product_id.to_string()),
        tag_id: Set(tag.clone()),
    }))
    .on_conflict(
        OnConflict::columns([product_tags::Column::ProductId, product_tags::Column::TagId])
            .do_nothing()
            .to_owned(),
    )
    .do_nothing()
    .exec(conn)
    .await?;

    Ok(())
}

/// Loads tags, items and item specs for `models` in three batched queries.
pub async fn load_records<C: ConnectionTrait>(
    conn: &C,
    models: Vec<ProductModel>,
) -> AppResult<Vec<ProductRecord>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<String> = models.iter().map(|p| p.id.clone()).collect();

    let mut tags_by_product: HashMap<String, Vec<TagRef>> = HashMap::new();
    for link in ProductTags::find()
        .filter(product_tags::Column::ProductId.is_in(ids.clone()))
        .order_by_asc(product_tags::Column::TagId)
        .all(conn)
        .await?
    {
        tags_by_product
            .entry(link.product_id)
            .or_default()
            .push(TagRef { id: link.tag_id });
    }

    let item_models = Items::find()
        .filter(items::Column::ProductId.is_in(ids))
        .order_by_asc(items::Column::Id)
        .all(conn)
        .await?;
    let mut items_by_product: HashMap<String, Vec<ItemRecord>> = HashMap::new();
    for item in load_item_records(conn, item_models).await? {
        items_by_product
            .entry(item.product_id.clone())
            .or_default()
            .push(item);
    }

    Ok(models
        .into_iter()
        .map(|model| ProductRecord {
            tags: tags_by_product.remove(&model.id).unwrap_or_default(),
            items: items_by_product.remove(&model.id).unwrap_or_default(),
            id: model.id,
            name: model.name,
            category: model.category,
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
        })
        .collect())
}

/// Attaches `{spec: {name}, value}` pairs to each item, preserving item order.
pub async fn load_item_records<C: ConnectionTrait>(
    conn: &C,
    models: Vec<items::Model>,
) -> AppResult<Vec<ItemRecord>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let item_ids: HashSet<i32> = models.iter().map(|item| item.id).collect();

    let mut specs_by_item: HashMap<i32, Vec<SpecValueRecord>> = HashMap::new();
    for (value, spec) in item_specs::Entity::find()
        .filter(item_specs::Column::ItemId.is_in(item_ids))
        .find_also_related(crate::entity::Specs)
        .all(conn)
        .await?
    {
        let Some(spec) = spec else { continue };
        specs_by_item
            .entry(value.item_id)
            .or_default()
            .push(SpecValueRecord {
                spec: SpecName { name: spec.name },
                value: value.value,
            });
    }

    Ok(models
        .into_iter()
        .map(|item| ItemRecord {
            specs: specs_by_item.remove(&item.id).unwrap_or_default(),
            id: item.id,
            product_id: item.product_id,
            price: item.price,
        })
        .collect())
}

async fn shape_all<C: ConnectionTrait>(
    conn: &C,
    models: Vec<ProductModel>,
) -> AppResult<Vec<Product>> {
    Ok(load_records(conn, models)
        .await?
        .into_iter()
        .map(product_from_record)
        .collect())
}
