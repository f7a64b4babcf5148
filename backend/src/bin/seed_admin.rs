//! One-shot administrator seeding tool
//!
//! Idempotently ensures exactly one admin record exists for the configured
//! email: a no-op when the account is already present.

use bcrypt::{hash, DEFAULT_COST};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rootcause_backend::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rc_seed_admin=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::load()?;
    let seed = &config.admin_seed;

    let db = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins WHERE email = $1")
        .bind(&seed.email)
        .fetch_one(&db)
        .await?;

    if existing > 0 {
        tracing::info!(
            "Admin with email {} already exists. Skipping creation.",
            seed.email
        );
        return Ok(());
    }

    let password_hash = hash(&seed.password, DEFAULT_COST)?;

    sqlx::query(
        r#"
        INSERT INTO admins (name, email, organisation_name, password_hash, state)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&seed.name)
    .bind(&seed.email)
    .bind(&seed.organisation_name)
    .bind(&password_hash)
    .bind(&seed.state)
    .execute(&db)
    .await?;

    tracing::info!("Default admin created with email: {}", seed.email);

    Ok(())
}
