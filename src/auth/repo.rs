use crate::auth::repo_types::{Role, User};
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, role, created_at";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    pub async fn create(
        db: &PgPool,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, role)
            VALUES ($1, $2, $3, $4, 'user')
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn list_all(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    pub async fn set_role(db: &PgPool, id: Uuid, role: Role) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Returns false when no such user existed.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
        let (n,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;
        Ok(n)
    }
}

/// Whether `e` is a Postgres unique-constraint failure, such as a duplicate email.
pub fn is_unique_violation(e: &anyhow::Error) -> bool {
    e.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}
