//! Startup seeding.
//!
//! Inserts the default admin account the first time the server starts
//! against an empty database. Safe to run on every startup.

use doable_core::model::NewUser;
use doable_core::storage::{Result, UserRepository};

/// Inserts the default account when the users table is empty.
pub async fn ensure_default_user(users: &dyn UserRepository) -> Result<()> {
    if users.count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("seeding database with initial users");

    let admin = users
        .create_user(NewUser {
            username: Some("admin".to_string()),
            email: "admin@example.com".to_string(),
            password: "password".to_string(),
            role: Some("admin".to_string()),
            avatar: Some("https://example.com/avatar.png".to_string()),
            status: Some("active".to_string()),
            data: None,
        })
        .await?;

    tracing::info!(user_id = admin.id, email = %admin.email, "seeded default user");
    Ok(())
}
