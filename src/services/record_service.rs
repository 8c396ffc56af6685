use chrono::Utc;
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::{
    entity::{RecordItems, Records, records},
    error::AppResult,
    models::{Record, RecordLine},
};

/// All order records with their lines, newest first.
pub async fn list_records<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<Record>> {
    let rows = Records::find()
        .find_with_related(RecordItems)
        .order_by_desc(records::Column::CreatedAt)
        .order_by_desc(records::Column::Id)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(record, lines)| Record {
            id: record.id,
            user_id: record.user_id,
            status: record.status,
            created_at: record.created_at.with_timezone(&Utc),
            items: lines
                .into_iter()
                .map(|line| RecordLine {
                    item_id: line.item_id,
                    amount: line.amount,
                    price: line.price,
                })
                .collect(),
        })
        .collect())
}
