use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::bikes::models::BikeFilter;
use crate::features::bookings::models::BookingStatus;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::types::page_offset;

// =============================================================================
// BIKE DTOs
// =============================================================================

/// Query params for listing bikes
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminBikeQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Filter by availability flag
    pub available: Option<bool>,
    /// Filter by category slug
    pub category: Option<String>,
    /// Case-insensitive name search
    pub search: Option<String>,
}

impl AdminBikeQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.limit())
    }
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
    pub fn filter(&self) -> BikeFilter {
        BikeFilter {
            is_available: self.available,
            category_slug: self.category.clone().filter(|s| !s.is_empty()),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

// =============================================================================
// BOOKING DTOs
// =============================================================================

/// Query params for listing bookings
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminBookingQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Filter by status
    pub status: Option<BookingStatus>,
}

impl AdminBookingQueryParams {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.limit())
    }
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Admin view of booking
#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct AdminBookingDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub bike_id: Uuid,
    pub bike_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::Uri};
    use serde::de::DeserializeOwned;

    fn parse<T: DeserializeOwned>(qs: &str) -> T {
        let uri: Uri = format!("/?{}", qs).parse().unwrap();
        Query::<T>::try_from_uri(&uri).unwrap().0
    }

    fn booking_query(qs: &str) -> AdminBookingQueryParams {
        parse(qs)
    }

    #[test]
    fn test_booking_query_defaults() {
        let q = booking_query("");
        assert_eq!(q.offset(), 0);
        assert_eq!(q.limit(), DEFAULT_PAGE_SIZE);
        assert!(q.status.is_none());
    }

    #[test]
    fn test_booking_query_status_and_paging() {
        let q = booking_query("page=3&page_size=500&status=cancelled");
        assert_eq!(q.status, Some(BookingStatus::Cancelled));
        assert_eq!(q.limit(), MAX_PAGE_SIZE);
        assert_eq!(q.offset(), 2 * MAX_PAGE_SIZE);
    }

    #[test]
    fn test_bike_query_filter_drops_blank_values() {
        let q: AdminBikeQueryParams = parse("available=false&category=&search=%20trek%20");
        let filter = q.filter();
        assert_eq!(filter.is_available, Some(false));
        assert!(filter.category_slug.is_none());
        assert_eq!(filter.search.as_deref(), Some("trek"));
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let q = booking_query("page=9223372036854775807&page_size=10");
        assert_eq!(q.offset(), i64::MAX);

        let q: AdminBikeQueryParams = parse("page=9223372036854775807&page_size=100");
        assert_eq!(q.offset(), i64::MAX);
        assert_eq!(q.limit(), 100);
    }
}
