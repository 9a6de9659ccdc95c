use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::bikes::dtos::BikeResponseDto;
use crate::features::bikes::models::{Bike, BikeFilter, BikeWithCategory, CreateBike};

const BIKE_COLUMNS: &str = "b.id, b.category_id, b.name, b.description, b.price_per_hour, \
     b.price_per_day, b.is_available, b.image_url, b.created_at";

/// Nullable parameters keep the filter query static:
/// $1 availability, $2 category slug, $3 name search
const FILTER_CLAUSE: &str = "($1::BOOLEAN IS NULL OR b.is_available = $1) \
     AND ($2::TEXT IS NULL OR c.slug = $2) \
     AND ($3::TEXT IS NULL OR strpos(lower(b.name), lower($3)) > 0)";

/// Service for bike catalog operations
pub struct BikeService {
    pool: PgPool,
}

impl BikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List bikes matching the filter, newest first
    pub async fn list(&self, filter: &BikeFilter) -> Result<Vec<BikeResponseDto>> {
        let sql = format!(
            "SELECT {BIKE_COLUMNS} FROM bikes b \
             JOIN bike_categories c ON c.id = b.category_id \
             WHERE {FILTER_CLAUSE} \
             ORDER BY b.created_at DESC, b.id"
        );

        let bikes = sqlx::query_as::<_, Bike>(&sql)
            .bind(filter.is_available)
            .bind(filter.category_slug.as_deref())
            .bind(filter.search.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list bikes: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(bikes.into_iter().map(Into::into).collect())
    }

    /// Paginated variant of [`BikeService::list`] returning the total count
    pub async fn list_paginated(
        &self,
        filter: &BikeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<BikeResponseDto>, i64)> {
        let count_sql = format!(
            "SELECT COUNT(*) FROM bikes b \
             JOIN bike_categories c ON c.id = b.category_id \
             WHERE {FILTER_CLAUSE}"
        );

        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(filter.is_available)
            .bind(filter.category_slug.as_deref())
            .bind(filter.search.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count bikes: {:?}", e);
                AppError::Database(e)
            })?;

        let sql = format!(
            "SELECT {BIKE_COLUMNS} FROM bikes b \
             JOIN bike_categories c ON c.id = b.category_id \
             WHERE {FILTER_CLAUSE} \
             ORDER BY b.created_at DESC, b.id \
             OFFSET $4 LIMIT $5"
        );

        let bikes = sqlx::query_as::<_, Bike>(&sql)
            .bind(filter.is_available)
            .bind(filter.category_slug.as_deref())
            .bind(filter.search.as_deref())
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list bikes: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((bikes.into_iter().map(Into::into).collect(), total))
    }

    /// All bikes currently flagged available, newest first
    pub async fn list_available(&self) -> Result<Vec<BikeResponseDto>> {
        self.list(&BikeFilter {
            is_available: Some(true),
            ..BikeFilter::default()
        })
        .await
    }

    /// Get a bike with its category
    pub async fn get_with_category(&self, id: Uuid) -> Result<BikeWithCategory> {
        let sql = format!(
            "SELECT {BIKE_COLUMNS}, c.name AS category_name, c.slug AS category_slug \
             FROM bikes b \
             JOIN bike_categories c ON c.id = b.category_id \
             WHERE b.id = $1"
        );

        sqlx::query_as::<_, BikeWithCategory>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get bike {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Bike {} not found", id)))
    }

    /// Create a bike in an existing category
    pub async fn create(&self, data: CreateBike) -> Result<BikeResponseDto> {
        let bike = sqlx::query_as::<_, Bike>(
            r#"
            INSERT INTO bikes
                (category_id, name, description, price_per_hour, price_per_day, is_available, image_url)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE EXISTS (SELECT 1 FROM bike_categories WHERE id = $1)
            RETURNING id, category_id, name, description, price_per_hour, price_per_day,
                      is_available, image_url, created_at
            "#,
        )
        .bind(data.category_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price_per_hour)
        .bind(data.price_per_day)
        .bind(data.is_available)
        .bind(&data.image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create bike: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| {
            AppError::NotFound(format!("Category {} not found", data.category_id))
        })?;

        tracing::info!(
            "Bike created: id={}, category_id={}, name={}",
            bike.id,
            bike.category_id,
            bike.name
        );

        Ok(bike.into())
    }

    /// Set the availability flag directly (administrator override)
    pub async fn set_availability(&self, id: Uuid, is_available: bool) -> Result<BikeResponseDto> {
        let bike = sqlx::query_as::<_, Bike>(
            r#"
            UPDATE bikes SET is_available = $2
            WHERE id = $1
            RETURNING id, category_id, name, description, price_per_hour, price_per_day,
                      is_available, image_url, created_at
            "#,
        )
        .bind(id)
        .bind(is_available)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update availability of bike {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Bike {} not found", id)))?;

        tracing::info!("Bike availability set: id={}, available={}", id, is_available);

        Ok(bike.into())
    }
}
