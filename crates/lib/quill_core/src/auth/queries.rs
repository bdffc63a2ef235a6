//! User and role database queries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use super::{AuthError, normalize_email};
use crate::models::auth::{Role, User, UserWithPassword};

/// Message for a registration whose email is already taken.
pub const EMAIL_TAKEN: &str = "Email already registered";

type UserRow = (i64, String, bool, Option<DateTime<Utc>>);

fn user_from_row((id, email, active, confirmed_at): UserRow, roles: Vec<Role>) -> User {
    User {
        id,
        email,
        active,
        confirmed_at,
        roles,
    }
}

/// Fetch a user (with roles and password hash) by email, ignoring case.
pub async fn find_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<UserWithPassword>, AuthError> {
    let row = sqlx::query_as::<_, (i64, String, bool, Option<DateTime<Utc>>, String)>(
        "SELECT id, email, active, confirmed_at, password FROM user WHERE email = ?",
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;

    let Some((id, email, active, confirmed_at, password_hash)) = row else {
        return Ok(None);
    };
    let roles = get_user_roles(pool, id).await?;
    Ok(Some(UserWithPassword {
        user: user_from_row((id, email, active, confirmed_at), roles),
        password_hash,
    }))
}

/// Fetch a user (with roles) by ID.
pub async fn get_user_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, active, confirmed_at FROM user WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match row {
        None => Ok(None),
        Some(row) => {
            let roles = get_user_roles(pool, user_id).await?;
            Ok(Some(user_from_row(row, roles)))
        }
    }
}

/// Fetch all users (with roles) in ID order.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, AuthError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, active, confirmed_at FROM user ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let assignments = sqlx::query_as::<_, (i64, i64, String, Option<String>)>(
        "SELECT ru.user_id, r.id, r.name, r.description \
         FROM roles_users ru JOIN role r ON r.id = ru.role_id \
         ORDER BY r.id",
    )
    .fetch_all(pool)
    .await?;

    let mut roles_by_user: HashMap<i64, Vec<Role>> = HashMap::new();
    for (user_id, id, name, description) in assignments {
        roles_by_user.entry(user_id).or_default().push(Role {
            id,
            name,
            description,
        });
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let roles = roles_by_user.remove(&row.0).unwrap_or_default();
            user_from_row(row, roles)
        })
        .collect())
}

/// Create a new active user, returning the user ID.
///
/// The email is stored normalised. A taken email is a validation error, so
/// a concurrent registration that loses the race is reported like any
/// other duplicate.
pub async fn create_user(
    conn: &mut SqliteConnection,
    email: &str,
    password_hash: &str,
) -> Result<i64, AuthError> {
    let result = sqlx::query("INSERT INTO user (email, password, active) VALUES (?, ?, 1)")
        .bind(normalize_email(email))
        .bind(password_hash)
        .execute(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AuthError::ValidationError(EMAIL_TAKEN.into())
            }
            e => AuthError::DbError(e),
        })?;
    Ok(result.last_insert_rowid())
}

/// Fetch roles for a user.
pub async fn get_user_roles(pool: &SqlitePool, user_id: i64) -> Result<Vec<Role>, AuthError> {
    let rows = sqlx::query_as::<_, (i64, String, Option<String>)>(
        "SELECT r.id, r.name, r.description \
         FROM role r JOIN roles_users ru ON ru.role_id = r.id \
         WHERE ru.user_id = ? ORDER BY r.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(id, name, description)| Role {
            id,
            name,
            description,
        })
        .collect())
}

/// Grant a role (by name) to a user. Granting a held role is a no-op.
pub async fn grant_role(
    conn: &mut SqliteConnection,
    user_id: i64,
    role: &str,
) -> Result<(), AuthError> {
    let role_id = sqlx::query_scalar::<_, i64>("SELECT id FROM role WHERE name = ?")
        .bind(role)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AuthError::Internal(format!("unknown role '{role}'")))?;

    sqlx::query("INSERT OR IGNORE INTO roles_users (user_id, role_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(role_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Activate or deactivate an account.
pub async fn set_user_active(
    pool: &SqlitePool,
    user_id: i64,
    active: bool,
) -> Result<(), AuthError> {
    sqlx::query("UPDATE user SET active = ? WHERE id = ?")
        .bind(active)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count total users.
pub async fn user_count(conn: &mut SqliteConnection) -> Result<i64, AuthError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user")
        .fetch_one(conn)
        .await?;
    Ok(count)
}
