use crate::{
    error::AppResult,
    services::item_service,
    session::{Cart, Session},
    state::AppState,
};

/// Adds one of the item. Fails with `NotFound` when the item does not exist.
pub async fn add_item(state: &AppState, session: &Session, item_id: i32) -> AppResult<u32> {
    item_service::get_item(&state.orm, item_id).await?;

    let quantity = session
        .update(|data| data.cart.get_or_insert_with(Cart::new).add(item_id))
        .await;
    tracing::debug!(session = %session.id, item_id, quantity, "cart add");
    Ok(quantity)
}

/// No-op for an unknown session, an absent cart or an absent item.
pub async fn subtract_item(session: &Session, item_id: i32) {
    let remaining = session
        .update_existing(|data| {
            data.cart.as_mut().map(|cart| {
                cart.subtract(item_id);
                cart.quantity(item_id)
            })
        })
        .await
        .flatten();
    tracing::debug!(session = %session.id, item_id, ?remaining, "cart subtract");
}

pub async fn remove_item(session: &Session, item_id: i32) {
    session
        .update_existing(|data| {
            if let Some(cart) = data.cart.as_mut() {
                cart.remove(item_id);
            }
        })
        .await;
    tracing::debug!(session = %session.id, item_id, "cart remove");
}

pub async fn empty_cart(session: &Session) {
    session
        .update_existing(|data| {
            if let Some(cart) = data.cart.as_mut() {
                cart.empty();
            }
        })
        .await;
    tracing::debug!(session = %session.id, "cart emptied");
}
