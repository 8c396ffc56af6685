use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::{
    entity::{Roles, Users, users},
    error::AppResult,
    models::User,
};

const FALLBACK_NAME: &str = "fallback";
const FALLBACK_EMAIL: &str = "fallback@smartphone-store";

/// The placeholder account records fall back to; never listed.
pub fn is_fallback_user(user: &User) -> bool {
    user.name == FALLBACK_NAME || user.email == FALLBACK_EMAIL
}

pub async fn list_users<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<User>> {
    let rows = Users::find()
        .find_also_related(Roles)
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(user, role)| User {
            id: user.id,
            name: user.name,
            email: user.email,
            role: role.map(|r| r.name),
        })
        .collect())
}

pub async fn list_visible_users<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<User>> {
    Ok(list_users(conn)
        .await?
        .into_iter()
        .filter(|user| !is_fallback_user(user))
        .collect())
}
