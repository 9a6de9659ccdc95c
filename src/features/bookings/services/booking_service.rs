use chrono::{NaiveDate, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::bikes::models::Bike;
use crate::features::bookings::models::{
    Booking, BookingStatus, BookingStatusChange, BookingWithBike,
};
use crate::features::bookings::services::availability::{self, DateRange};

const BOOKING_COLUMNS: &str =
    "bk.id, bk.user_id, bk.bike_id, bk.start_date, bk.end_date, bk.total_cost, bk.status, bk.created_at";

const BIKE_COLUMNS: &str = "id, category_id, name, description, price_per_hour, price_per_day, \
     is_available, image_url, created_at";

/// Service for booking admission and status changes
pub struct BookingService {
    pool: PgPool,
}

impl BookingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Pending/active bookings of a bike intersecting `range`
    async fn blocking_bookings<'e, E>(
        executor: E,
        bike_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<Booking>>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings bk \
             WHERE bk.bike_id = $1 \
               AND bk.status IN ('pending', 'active') \
               AND bk.start_date <= $3 AND bk.end_date >= $2"
        );

        sqlx::query_as::<_, Booking>(&sql)
            .bind(bike_id)
            .bind(range.start())
            .bind(range.end())
            .fetch_all(executor)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load bookings for bike {}: {:?}", bike_id, e);
                AppError::Database(e)
            })
    }

    async fn account_id<'e, E>(executor: E, subject: &str) -> Result<Uuid>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE subject = $1")
            .bind(subject)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                tracing::error!("Failed to resolve user account: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| {
                AppError::NotFound("User account not found; register before booking".to_string())
            })
    }

    /// Lock the bike row until the surrounding transaction ends
    async fn lock_bike<'e, E>(executor: E, bike_id: Uuid) -> Result<Bike>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("SELECT {BIKE_COLUMNS} FROM bikes WHERE id = $1 FOR UPDATE");

        sqlx::query_as::<_, Bike>(&sql)
            .bind(bike_id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                tracing::error!("Failed to lock bike {}: {:?}", bike_id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Bike {} not found", bike_id)))
    }

    /// Admit and record a booking request.
    ///
    /// The bike row stays locked until commit, so two requests for the same
    /// bike are admitted one after the other.
    pub async fn request_booking(
        &self,
        user: &AuthenticatedUser,
        bike_id: Uuid,
        range: DateRange,
    ) -> Result<BookingWithBike> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin booking transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let user_id = Self::account_id(&mut *tx, &user.sub).await?;

        let bike = Self::lock_bike(&mut *tx, bike_id).await?;

        let existing = Self::blocking_bookings(&mut *tx, bike.id, &range).await?;
        let admitted = availability::admit_booking(user_id, &bike, range, &existing)?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, bike_id, start_date, end_date, total_cost, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, bike_id, start_date, end_date, total_cost, status, created_at
            "#,
        )
        .bind(admitted.user_id)
        .bind(admitted.bike_id)
        .bind(admitted.start_date)
        .bind(admitted.end_date)
        .bind(admitted.total_cost)
        .bind(admitted.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert booking: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit booking: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Booking created: id={}, bike_id={}, user_id={}, dates={}..{}, total={}",
            booking.id,
            booking.bike_id,
            booking.user_id,
            booking.start_date,
            booking.end_date,
            booking.total_cost
        );

        Ok(BookingWithBike {
            booking,
            bike_name: bike.name,
        })
    }

    /// Change a booking's status and apply the availability rule to its bike
    /// in the same transaction.
    ///
    /// Reopening a completed or cancelled booking re-runs the overlap check
    /// under the bike lock, like a new request.
    pub async fn set_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<BookingStatusChange> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin status transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings bk WHERE bk.id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, Booking>(&sql)
            .bind(booking_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load booking {}: {:?}", booking_id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;

        let bike = Self::lock_bike(&mut *tx, current.bike_id).await?;

        if status.blocks_dates() && !current.status.blocks_dates() {
            let range = DateRange::from(&current);
            let existing = Self::blocking_bookings(&mut *tx, bike.id, &range).await?;
            availability::check_status_change(&current, status, &existing)?;
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET status = $2
            WHERE id = $1
            RETURNING id, user_id, bike_id, start_date, end_date, total_cost, status, created_at
            "#,
        )
        .bind(booking_id)
        .bind(status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update booking {}: {:?}", booking_id, e);
            AppError::Database(e)
        })?;

        let bike = match availability::availability_update(status) {
            Some(flag) => {
                let sql =
                    format!("UPDATE bikes SET is_available = $2 WHERE id = $1 RETURNING {BIKE_COLUMNS}");
                sqlx::query_as::<_, Bike>(&sql)
                    .bind(bike.id)
                    .bind(flag)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| {
                        tracing::error!(
                            "Failed to synchronize availability of bike {}: {:?}",
                            bike.id,
                            e
                        );
                        AppError::Database(e)
                    })?
            }
            None => bike,
        };

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit status change: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Booking status changed: id={}, {} -> {}, bike_id={}, bike_available={}",
            booking.id,
            current.status,
            booking.status,
            bike.id,
            bike.is_available
        );

        Ok(BookingStatusChange { booking, bike })
    }

    /// Mark many bookings completed; returns how many rows changed.
    ///
    /// Completion never touches the availability flag.
    pub async fn complete_bookings(&self, ids: &[Uuid]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result =
            sqlx::query("UPDATE bookings SET status = 'completed' WHERE id = ANY($1)")
                .bind(ids)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to complete bookings: {:?}", e);
                    AppError::Database(e)
                })?;

        tracing::info!(
            "Bookings completed: requested={}, updated={}",
            ids.len(),
            result.rows_affected()
        );

        Ok(result.rows_affected())
    }

    /// A pending/active booking covers `date`
    pub async fn is_booked_on(&self, bike_id: Uuid, date: NaiveDate) -> Result<bool> {
        let day = DateRange::single_day(date);
        let bookings = Self::blocking_bookings(&self.pool, bike_id, &day).await?;
        Ok(availability::is_booked_on(bike_id, date, &bookings))
    }

    /// [`BookingService::is_booked_on`] for the current UTC date
    pub async fn is_booked_today(&self, bike_id: Uuid) -> Result<bool> {
        self.is_booked_on(bike_id, Utc::now().date_naive()).await
    }

    /// Bookings of the caller, most recent start date first
    pub async fn list_for_user(&self, user: &AuthenticatedUser) -> Result<Vec<BookingWithBike>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS}, b.name AS bike_name \
             FROM bookings bk \
             JOIN users u ON u.id = bk.user_id \
             JOIN bikes b ON b.id = bk.bike_id \
             WHERE u.subject = $1 \
             ORDER BY bk.start_date DESC, bk.created_at DESC"
        );

        sqlx::query_as::<_, BookingWithBike>(&sql)
            .bind(&user.sub)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list bookings for user: {:?}", e);
                AppError::Database(e)
            })
    }

    /// One of the caller's bookings; someone else's booking is reported as missing
    pub async fn get_for_user(
        &self,
        user: &AuthenticatedUser,
        booking_id: Uuid,
    ) -> Result<BookingWithBike> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS}, b.name AS bike_name \
             FROM bookings bk \
             JOIN users u ON u.id = bk.user_id \
             JOIN bikes b ON b.id = bk.bike_id \
             WHERE bk.id = $1 AND u.subject = $2"
        );

        sqlx::query_as::<_, BookingWithBike>(&sql)
            .bind(booking_id)
            .bind(&user.sub)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get booking {}: {:?}", booking_id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))
    }
}
