use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::bikes::models::{Bike, BikeFilter, BikeWithCategory, CreateBike};
use crate::shared::constants::{MAX_AMOUNT, MSG_AVAILABLE_TODAY, MSG_BOOKED_TODAY};

/// Response DTO for bike
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BikeResponseDto {
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

impl From<Bike> for BikeResponseDto {
    fn from(b: Bike) -> Self {
        Self {
            id: b.id,
            category_id: b.category_id,
            name: b.name,
            description: b.description,
            price_per_hour: b.price_per_hour,
            price_per_day: b.price_per_day,
            is_available: b.is_available,
            image_url: b.image_url,
            created_at: b.created_at,
        }
    }
}

/// Bike detail page payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BikeDetailDto {
    #[serde(flatten)]
    pub bike: BikeResponseDto,
    pub category_name: String,
    pub category_slug: String,
    /// A pending or active booking covers today's date
    pub is_booked_today: bool,
    pub availability_message: String,
}

impl BikeDetailDto {
    pub fn new(row: BikeWithCategory, is_booked_today: bool) -> Self {
        let availability_message = if is_booked_today {
            MSG_BOOKED_TODAY
        } else {
            MSG_AVAILABLE_TODAY
        };

        Self {
            bike: row.bike.into(),
            category_name: row.category_name,
            category_slug: row.category_slug,
            is_booked_today,
            availability_message: availability_message.to_string(),
        }
    }
}

/// Home listing: every available bike plus the first few as featured
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeDto {
    pub available_bikes: Vec<BikeResponseDto>,
    pub featured_bikes: Vec<BikeResponseDto>,
}

impl HomeDto {
    pub fn from_available(available_bikes: Vec<BikeResponseDto>, featured_count: usize) -> Self {
        let featured_bikes = available_bikes
            .iter()
            .take(featured_count)
            .cloned()
            .collect();
        Self {
            available_bikes,
            featured_bikes,
        }
    }
}

/// Query parameters for listing bikes
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct BikeListQuery {
    /// Only bikes with this availability flag
    pub available: Option<bool>,
    /// Only bikes in the category with this slug
    pub category: Option<String>,
    /// Case-insensitive name search
    pub search: Option<String>,
}

impl From<BikeListQuery> for BikeFilter {
    fn from(q: BikeListQuery) -> Self {
        Self {
            is_available: q.available,
            category_slug: q.category.filter(|s| !s.is_empty()),
            search: q
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Request DTO for creating a bike
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBikeDto {
    pub category_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub price_per_hour: Decimal,

    pub price_per_day: Decimal,

    #[serde(default = "default_true")]
    pub is_available: bool,

    #[validate(url(message = "Image must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn check_price(field: &str, value: Decimal) -> Result<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::Validation(format!("{} must not be negative", field)));
    }
    if value.normalize().scale() > 2 {
        return Err(AppError::Validation(format!(
            "{} must have at most 2 decimal places",
            field
        )));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::Validation(format!("{} is too large", field)));
    }
    Ok(value.round_dp(2))
}

impl CreateBikeDto {
    pub fn into_new_bike(self) -> Result<CreateBike> {
        Ok(CreateBike {
            category_id: self.category_id,
            name: self.name.trim().to_string(),
            description: self.description,
            price_per_hour: check_price("Price per hour", self.price_per_hour)?,
            price_per_day: check_price("Price per day", self.price_per_day)?,
            is_available: self.is_available,
            image_url: self.image_url,
        })
    }
}

/// Request DTO for flipping a bike's availability flag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityDto {
    pub is_available: bool,
}
