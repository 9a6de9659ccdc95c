use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a local user account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserAccount {
    pub id: Uuid,
    pub subject: String,
    pub username: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database model for the one profile each account owns
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Account joined with its profile columns
#[derive(Debug, Clone, FromRow)]
pub struct UserWithProfile {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for creating an account and its profile
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub subject: String,
    pub username: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Profile fields to overwrite; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub phone_number: Option<String>,
    pub address: Option<String>,
}
