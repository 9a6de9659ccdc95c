use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::bikes::models::Bike;

/// Booking status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Pending and active bookings hold their dates against new requests
    pub fn blocks_dates(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Active)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Active => write!(f, "active"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Database model for booking
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bike_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// An admitted booking request, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub bike_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: BookingStatus,
}

/// Booking joined with the name of its bike
#[derive(Debug, Clone, FromRow)]
pub struct BookingWithBike {
    #[sqlx(flatten)]
    pub booking: Booking,
    pub bike_name: String,
}

/// Result of a status change: the booking and its bike as persisted
#[derive(Debug, Clone)]
pub struct BookingStatusChange {
    pub booking: Booking,
    pub bike: Bike,
}
