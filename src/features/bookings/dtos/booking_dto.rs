use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::bikes::dtos::BikeResponseDto;
use crate::features::bookings::models::{BookingStatus, BookingStatusChange, BookingWithBike};
use crate::features::bookings::services::availability::DateRange;

/// Request DTO for booking a bike; dates are `YYYY-MM-DD`, both inclusive
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    #[schema(example = "2024-01-01")]
    pub start_date: String,
    #[schema(example = "2024-01-03")]
    pub end_date: String,
}

impl CreateBookingDto {
    pub fn into_range(self) -> Result<DateRange> {
        DateRange::parse(&self.start_date, &self.end_date)
    }
}

/// Response DTO for booking
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bike_id: Uuid,
    pub bike_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<BookingWithBike> for BookingResponseDto {
    fn from(row: BookingWithBike) -> Self {
        let b = row.booking;
        Self {
            id: b.id,
            user_id: b.user_id,
            bike_id: b.bike_id,
            bike_name: row.bike_name,
            start_date: b.start_date,
            end_date: b.end_date,
            total_cost: b.total_cost,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

/// Request DTO for an administrator status change
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusDto {
    pub status: BookingStatus,
}

/// Booking after a status change, with its bike as persisted afterwards
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusChangeDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: BookingStatus,
    pub bike: BikeResponseDto,
}

impl From<BookingStatusChange> for BookingStatusChangeDto {
    fn from(change: BookingStatusChange) -> Self {
        let b = change.booking;
        Self {
            id: b.id,
            user_id: b.user_id,
            start_date: b.start_date,
            end_date: b.end_date,
            total_cost: b.total_cost,
            status: b.status,
            bike: change.bike.into(),
        }
    }
}

/// Request DTO for completing bookings in bulk
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBookingsDto {
    #[validate(length(min = 1, max = 500, message = "Provide 1-500 booking ids"))]
    pub booking_ids: Vec<Uuid>,
}

/// Bulk completion result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBookingsResultDto {
    pub completed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::bookings::models::Booking;

    #[test]
    fn test_create_booking_dto_camel_case() {
        let dto: CreateBookingDto =
            serde_json::from_str(r#"{"startDate":"2024-01-01","endDate":"2024-01-03"}"#).unwrap();
        let range = dto.into_range().unwrap();
        assert_eq!(range.days(), 3);
    }

    #[test]
    fn test_create_booking_dto_rejects_reversed_dates() {
        let dto = CreateBookingDto {
            start_date: "2024-01-03".to_string(),
            end_date: "2024-01-01".to_string(),
        };
        assert!(matches!(dto.into_range(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_status_wire_format() {
        let dto: UpdateBookingStatusDto = serde_json::from_str(r#"{"status":"active"}"#).unwrap();
        assert_eq!(dto.status, BookingStatus::Active);
        assert!(serde_json::from_str::<UpdateBookingStatusDto>(r#"{"status":"Active"}"#).is_err());
        assert!(serde_json::from_str::<UpdateBookingStatusDto>(r#"{"status":"lost"}"#).is_err());
    }

    #[test]
    fn test_booking_response_serialization() {
        let row = BookingWithBike {
            booking: Booking {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                bike_id: Uuid::new_v4(),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                total_cost: Decimal::new(6000, 2),
                status: BookingStatus::Pending,
                created_at: Utc::now(),
            },
            bike_name: "Bike B".to_string(),
        };

        let json = serde_json::to_value(BookingResponseDto::from(row)).unwrap();
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["endDate"], "2024-01-03");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["bikeName"], "Bike B");
    }

    #[test]
    fn test_complete_bookings_requires_ids() {
        let dto = CompleteBookingsDto {
            booking_ids: vec![],
        };
        assert!(dto.validate().is_err());
    }
}
