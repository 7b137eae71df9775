use food_marketplace::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    models::Role,
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let customer_id = ensure_user(&pool, "customer_user", "customer", "Bukit Panjang", Role::Customer).await?;
    let seller_id = ensure_user(&pool, "seller_user", "seller", "Yishun", Role::Seller).await?;
    seed_food_items(&pool, seller_id).await?;

    println!("Seed completed. Customer ID: {customer_id}, Seller ID: {seller_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    username: &str,
    password: &str,
    location: &str,
    role: Role,
) -> anyhow::Result<i32> {
    let password_hash = hash_password(password)?;

    let (user_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO users (username, password_hash, location, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (username) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(location)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    println!("Ensured user {username} (role={role})");
    Ok(user_id)
}

async fn seed_food_items(pool: &sqlx::PgPool, seller_id: i32) -> anyhow::Result<()> {
    let items: [(&str, &str, i64, i32); 4] = [
        ("Nasi Lemak", "Coconut rice with sambal, best before tonight", 350, 12),
        ("Kaya Toast Set", "Two slices with soft-boiled eggs", 280, 20),
        ("Curry Puff", "Potato and chicken, baked this morning", 150, 40),
        ("Chicken Rice", "Steamed chicken, chilli and ginger on the side", 450, 8),
    ];

    for (name, description, price, quantity) in items {
        let exists: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM food_items WHERE seller_id = $1 AND name = $2")
                .bind(seller_id)
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if exists.is_some() {
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO food_items (name, quantity, price, description, image_url, seller_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(name)
        .bind(quantity)
        .bind(price)
        .bind(description)
        .bind("/uploads/placeholder.png")
        .bind(seller_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded food items");
    Ok(())
}
