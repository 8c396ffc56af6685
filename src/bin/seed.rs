use coffee_storefront::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations, OrmConn},
    dto::products::{NewProduct, SizeEntry},
    entity::{
        Products, RecordItems, Records, Roles, Users, record_items, records, roles, users,
    },
    models::{Category, SALE_STATUS},
    services::product_service,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    ActiveValue::NotSet,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_role = ensure_role(&orm, "administrator").await?;
    ensure_role(&orm, "manager").await?;
    let customer_role = ensure_role(&orm, "customer").await?;

    ensure_user(&orm, "fallback", "fallback@smartphone-store", customer_role).await?;
    let admin_id = ensure_user(&orm, "Admin", "admin@example.com", admin_role).await?;
    let customer_id = ensure_user(&orm, "Guest", "guest@example.com", customer_role).await?;

    seed_products(&orm).await?;
    seed_records(&orm, customer_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, Customer ID: {customer_id}");
    Ok(())
}

async fn ensure_role(orm: &OrmConn, name: &str) -> anyhow::Result<i32> {
    if let Some(role) = Roles::find()
        .filter(roles::Column::Name.eq(name))
        .one(orm)
        .await?
    {
        return Ok(role.id);
    }
    let role = roles::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
    }
    .insert(orm)
    .await?;
    println!("Ensured role {name}");
    Ok(role.id)
}

async fn ensure_user(orm: &OrmConn, name: &str, email: &str, role_id: i32) -> anyhow::Result<i32> {
    if let Some(user) = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(orm)
        .await?
    {
        return Ok(user.id);
    }
    let user = users::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        role_id: Set(role_id),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;
    println!("Ensured user {email} (role_id={role_id})");
    Ok(user.id)
}

fn sizes(entries: &[(&str, i64)]) -> Vec<SizeEntry> {
    entries
        .iter()
        .map(|(size, price)| SizeEntry {
            size: size.to_string(),
            price: *price,
        })
        .collect()
}

async fn seed_products(orm: &OrmConn) -> anyhow::Result<()> {
    let catalog = vec![
        (
            "cf-latte",
            "Caramel Latte",
            Category::Cf,
            vec!["best-seller"],
            "Espresso, steamed milk and house caramel.",
            sizes(&[("S", 35000), ("M", 42000), ("L", 49000)]),
        ),
        (
            "cf-gingerbread",
            "Gingerbread Mocha",
            Category::Cf,
            vec!["christmas"],
            "Seasonal mocha with ginger and cinnamon.",
            sizes(&[("M", 52000), ("L", 59000)]),
        ),
        (
            "tea-peach",
            "Peach Oolong",
            Category::Tea,
            vec!["best-seller"],
            "Oolong tea with peach slices.",
            sizes(&[("M", 39000), ("L", 45000)]),
        ),
        (
            "ice-matcha",
            "Matcha Ice Blended",
            Category::Ice,
            vec![],
            "Blended matcha with cream.",
            sizes(&[("M", 55000)]),
        ),
        (
            "bread-stollen",
            "Christmas Stollen",
            Category::Bread,
            vec!["christmas", "best-seller"],
            "Fruit bread dusted with icing sugar.",
            sizes(&[("Slice", 30000), ("Loaf", 180000)]),
        ),
    ];

    for (id, name, category, tags, description, sizes) in catalog {
        if Products::find_by_id(id.to_string()).one(orm).await?.is_some() {
            continue;
        }
        product_service::create_product(
            orm,
            NewProduct {
                id: id.to_string(),
                name: name.to_string(),
                category,
                tags: tags.into_iter().map(str::to_string).collect(),
                description: Some(description.to_string()),
            },
            &sizes,
        )
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_records(orm: &OrmConn, user_id: i32) -> anyhow::Result<()> {
    if Records::find().count(orm).await? > 0 {
        return Ok(());
    }

    let latte = product_service::get_product(orm, "cf-latte").await?;
    let stollen = product_service::get_product(orm, "bread-stollen").await?;
    let orders = [
        (SALE_STATUS, &latte, 2),
        (SALE_STATUS, &latte, 1),
        (SALE_STATUS, &stollen, 1),
        ("failed", &stollen, 3),
    ];

    for (status, product, amount) in orders {
        let Some(item) = product.items.first() else { continue };
        let record = records::ActiveModel {
            id: NotSet,
            user_id: Set(Some(user_id)),
            status: Set(status.to_string()),
            created_at: NotSet,
        }
        .insert(orm)
        .await?;
        RecordItems::insert(record_items::ActiveModel {
            id: NotSet,
            record_id: Set(record.id),
            item_id: Set(Some(item.id)),
            amount: Set(amount),
            price: Set(item.price),
        })
        .exec(orm)
        .await?;
    }

    println!("Seeded records");
    Ok(())
}
