use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for bike
#[derive(Debug, Clone, FromRow)]
pub struct Bike {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub price_per_hour: Decimal,
    pub price_per_day: Decimal,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Bike joined with the category it belongs to
#[derive(Debug, Clone, FromRow)]
pub struct BikeWithCategory {
    #[sqlx(flatten)]
    pub bike: Bike,
    pub category_name: String,
    pub category_slug: String,
}

/// Data for creating a new bike
#[derive(Debug)]
pub struct CreateBike {
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub price_per_hour: Decimal,
    pub price_per_day: Decimal,
    pub is_available: bool,
    pub image_url: Option<String>,
}

/// Listing filters shared by the public and admin bike lists
#[derive(Debug, Clone, Default)]
pub struct BikeFilter {
    pub is_available: Option<bool>,
    pub category_slug: Option<String>,
    /// Case-insensitive substring of the bike name
    pub search: Option<String>,
}
