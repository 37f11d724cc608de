//! Seed an initial admin account from the command line.
//!
//! Intended for first-time setup and local development:
//!
//! ```text
//! DATABASE_URL=... SEED_ADMIN_USERNAME=admin SEED_ADMIN_PASSWORD=... \
//!     cargo run --bin seed-admin
//! ```
//!
//! Exits without changes if the username already exists.

use fitout_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use fitout_core::roles::ROLE_ADMIN;
use fitout_db::models::user::InsertUser;
use fitout_db::repositories::UserRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let username =
        std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").expect("SEED_ADMIN_PASSWORD must be set");

    if let Err(msg) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
        eprintln!("Refusing to seed admin: {msg}");
        std::process::exit(1);
    }

    let pool = fitout_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    fitout_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    if let Some(existing) = UserRepo::find_by_username(&pool, &username)
        .await
        .expect("Failed to query users")
    {
        tracing::info!(user_id = existing.id, %username, "Admin user already exists, nothing to do");
        return;
    }

    let insert = InsertUser {
        username: username.clone(),
        email: None,
        password_hash: hash_password(&password).expect("Password hashing failed"),
        role: ROLE_ADMIN.to_string(),
    };
    let user = UserRepo::create(&pool, &insert)
        .await
        .expect("Failed to create admin user");

    tracing::info!(user_id = user.id, %username, "Seeded admin user");
}
