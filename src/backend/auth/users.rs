/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Name shown to other users; defaults to the username
    pub display_name: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `display_name` - Name shown to other users
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error. A taken username surfaces as a unique-constraint
/// database error, see [`is_unique_violation`].
pub async fn create_user(
    pool: &SqlitePool,
    username: String,
    display_name: String,
    password_hash: String,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, display_name, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, username, display_name, password_hash, created_at
        "#,
    )
    .bind(id)
    .bind(&username)
    .bind(&display_name)
    .bind(&password_hash)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, display_name, password_hash, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, display_name, password_hash, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Delete a user; returns whether a row was removed
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Whether a database error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
