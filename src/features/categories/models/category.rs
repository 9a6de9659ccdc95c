use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for bike category
#[derive(Debug, Clone, FromRow)]
pub struct BikeCategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a category; the slug is already resolved
#[derive(Debug)]
pub struct CreateBikeCategory {
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
}
