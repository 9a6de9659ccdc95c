use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::AdminBookingDto;
use crate::features::bookings::models::BookingStatus;

/// Service for admin queries
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // BOOKINGS
    // =========================================================================

    /// List bookings with renter and bike names, most recent start date first
    pub async fn list_bookings(
        &self,
        status: Option<BookingStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<AdminBookingDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE ($1::booking_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count bookings: {:?}", e);
            AppError::Database(e)
        })?;

        let items = sqlx::query_as::<_, AdminBookingDto>(
            r#"
            SELECT bk.id, bk.user_id, u.username, bk.bike_id, b.name AS bike_name,
                   bk.start_date, bk.end_date, bk.total_cost, bk.status, bk.created_at
            FROM bookings bk
            JOIN users u ON u.id = bk.user_id
            JOIN bikes b ON b.id = bk.bike_id
            WHERE ($1::booking_status IS NULL OR bk.status = $1)
            ORDER BY bk.start_date DESC, bk.created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(status)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list bookings: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((items, total))
    }
}
