use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::dto::PublicUser;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                     // unique user ID
    pub first_name: String,
    pub last_name: String,
    pub email: String,                // user email
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 hash, not exposed in JSON
    pub role: String,                 // "user" or "admin"
    pub created_at: OffsetDateTime,   // creation timestamp
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_db(&self.role)
    }

    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Unknown values read as a plain user.
    pub fn from_db(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }
}
