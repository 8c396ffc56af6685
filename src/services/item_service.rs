use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::OnConflict,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    db::OrmConn,
    dto::{
        items::{ItemPatch, NewItem},
        products::SizeEntry,
    },
    entity::{
        ItemSpecs, Items, Specs as SpecEntity, item_specs,
        items::{ActiveModel, Column, Model as ItemModel},
        specs,
    },
    error::{AppError, AppResult},
    models::{Item, SIZE_SPEC, Specs},
    services::product_service::{item_from_record, load_item_records},
};

pub async fn get_item<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Item> {
    let model = Items::find_by_id(id).one(conn).await?;
    let model = match model {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };
    load_item_records(conn, vec![model])
        .await?
        .pop()
        .map(item_from_record)
        .ok_or(AppError::NotFound)
}

/// Items with the given ids, in ascending id order. Unknown ids are skipped.
pub async fn get_items<C: ConnectionTrait>(conn: &C, ids: Vec<i32>) -> AppResult<Vec<Item>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let models = Items::find()
        .filter(Column::Id.is_in(ids))
        .order_by_asc(Column::Id)
        .all(conn)
        .await?;
    Ok(load_item_records(conn, models)
        .await?
        .into_iter()
        .map(item_from_record)
        .collect())
}

pub async fn add_item(orm: &OrmConn, new: NewItem) -> AppResult<Item> {
    let txn = orm.begin().await?;
    let model = insert_item(&txn, &new.product_id, new.price, &new.specs).await?;
    let item = get_item(&txn, model.id).await?;
    txn.commit().await?;

    tracing::info!(item_id = item.id, product_id = %item.product_id, "item created");
    Ok(item)
}

pub async fn update_item(orm: &OrmConn, id: i32, patch: ItemPatch) -> AppResult<Item> {
    let txn = orm.begin().await?;

    let existing = Items::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(product_id) = patch.product_id {
        active.product_id = Set(product_id);
    }
    if let Some(price) = patch.price {
        active.price = Set(price);
    }
    if active.is_changed() {
        active.update(&txn).await?;
    }

    if let Some(specs) = patch.specs.as_ref() {
        set_item_specs(&txn, id, specs).await?;
    }

    let item = get_item(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(item_id = id, "item updated");
    Ok(item)
}

pub async fn insert_item<C: ConnectionTrait>(
    conn: &C,
    product_id: &str,
    price: i64,
    specs: &Specs,
) -> AppResult<ItemModel> {
    let item = ActiveModel {
        id: NotSet,
        product_id: Set(product_id.to_string()),
        price: Set(price),
    }
    .insert(conn)
    .await?;

    set_item_specs(conn, item.id, specs).await?;
    Ok(item)
}

/// Replaces the item's spec values, creating spec names on first use.
pub async fn set_item_specs<C: ConnectionTrait>(
    conn: &C,
    item_id: i32,
    specs: &Specs,
) -> AppResult<()> {
    ItemSpecs::delete_many()
        .filter(item_specs::Column::ItemId.eq(item_id))
        .exec(conn)
        .await?;

    if specs.is_empty() {
        return Ok(());
    }

    SpecEntity::insert_many(specs.keys().map(|name| specs::ActiveModel {
        id: NotSet,
        name: Set(name.clone()),
    }))
    .on_conflict(OnConflict::column(specs::Column::Name).do_nothing().to_owned())
    .do_nothing()
    .exec(conn)
    .await?;

    let spec_ids: HashMap<String, i32> = SpecEntity::find()
        .filter(specs::Column::Name.is_in(specs.keys().cloned()))
        .all(conn)
        .await?
        .into_iter()
        .map(|spec| (spec.name, spec.id))
        .collect();

    let mut rows = Vec::with_capacity(specs.len());
    for (name, value) in specs {
        let spec_id = spec_ids
            .get(name)
            .copied()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("spec {name:?} was not stored")))?;
        rows.push(item_specs::ActiveModel {
            item_id: Set(item_id),
            spec_id: Set(spec_id),
            value: Set(value.clone()),
        });
    }
    ItemSpecs::insert_many(rows).exec(conn).await?;

    Ok(())
}

/// Deletes every item of the product. Returns how many were removed.
pub async fn delete_for_product<C: ConnectionTrait>(conn: &C, product_id: &str) -> AppResult<u64> {
    let result = Items::delete_many()
        .filter(Column::ProductId.eq(product_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Full replace: drops all existing variants and creates one `Size` item per
/// entry. No attempt is made to match old items to new ones.
pub async fn replace_for_product<C: ConnectionTrait>(
    conn: &C,
    product_id: &str,
    sizes: &[SizeEntry],
) -> AppResult<u64> {
    let removed = delete_for_product(conn, product_id).await?;
    for entry in sizes {
        let specs = Specs::from([(SIZE_SPEC.to_string(), entry.size.clone())]);
        insert_item(conn, product_id, entry.price, &specs).await?;
    }
    Ok(removed)
}
