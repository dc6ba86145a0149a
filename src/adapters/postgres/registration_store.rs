//! PostgreSQL implementation of RegistrationStore.
//!
//! Uniqueness of `name` and `email` is enforced by the `users_name_key` and
//! `users_email_key` constraints; a violation of either maps to
//! `ErrorCode::UserAlreadyExists`.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::registration::{
    EmailAddress, NewUser, Preference, RegisteredUser, User, UserName,
};
use crate::ports::RegistrationStore;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;

const UNIQUE_CONSTRAINTS: [&str; 2] = ["users_name_key", "users_email_key"];

/// PostgreSQL implementation of the RegistrationStore port.
pub struct PostgresRegistrationStore {
    pool: PgPool,
}

impl PostgresRegistrationStore {
    /// Creates a new PostgresRegistrationStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    affiliate: bool,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_raw(row.id),
            name: UserName::try_new(row.name).map_err(|e| {
                DomainError::database(format!("Invalid stored name for user {}: {}", row.id, e))
            })?,
            email: EmailAddress::try_new(row.email).map_err(|e| {
                DomainError::database(format!("Invalid stored email for user {}: {}", row.id, e))
            })?,
            affiliate: row.affiliate,
        })
    }
}

/// Database row representation of a preference.
#[derive(Debug, sqlx::FromRow)]
struct PreferenceRow {
    user_id: i64,
    key: String,
}

fn is_identity_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .constraint()
            .map(|c| UNIQUE_CONSTRAINTS.contains(&c))
            .unwrap_or(false),
        _ => false,
    }
}

#[async_trait]
impl RegistrationStore for PostgresRegistrationStore {
    async fn list_all(&self) -> Result<Vec<RegisteredUser>, DomainError> {
        let users: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, affiliate
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list users: {}", e)))?;

        let preference_rows: Vec<PreferenceRow> = sqlx::query_as(
            r#"
            SELECT user_id, key
            FROM preferences
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list preferences: {}", e)))?;

        let mut by_user: HashMap<i64, Vec<Preference>> = HashMap::new();
        for row in preference_rows {
            by_user
                .entry(row.user_id)
                .or_default()
                .push(Preference::new(row.key));
        }

        users
            .into_iter()
            .map(|row| {
                let preferences = by_user.remove(&row.id).unwrap_or_default();
                Ok(RegisteredUser {
                    user: User::try_from(row)?,
                    preferences,
                })
            })
            .collect()
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, affiliate)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(new_user.name.as_str())
        .bind(new_user.email.as_str())
        .bind(new_user.affiliate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_identity_conflict(&e) {
                return DomainError::new(
                    ErrorCode::UserAlreadyExists,
                    "A user with this name or email already exists",
                );
            }
            DomainError::database(format!("Failed to create user: {}", e))
        })?;

        Ok(new_user.clone().into_user(UserId::from_raw(id)))
    }

    async fn add_preference(&self, user: &User, key: &str) -> Result<Preference, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO preferences (user_id, key)
            VALUES ($1, $2)
            "#,
        )
        .bind(user.id.as_i64())
        .bind(key)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!(
                "Failed to add preference for user {}: {}",
                user.id, e
            ))
        })?;

        Ok(Preference::new(key))
    }
}
