use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::bikes::models::Bike;
use crate::features::categories::dtos::{CategoryDetailDto, CategoryResponseDto};
use crate::features::categories::models::{BikeCategory, CreateBikeCategory};

/// Service for bike category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, BikeCategory>(
            r#"
            SELECT id, name, slug, image_url, created_at
            FROM bike_categories
            ORDER BY name, slug
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Get category by slug, with its bikes (newest first)
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryDetailDto> {
        let category = sqlx::query_as::<_, BikeCategory>(
            r#"
            SELECT id, name, slug, image_url, created_at
            FROM bike_categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;

        let bikes = sqlx::query_as::<_, Bike>(
            r#"
            SELECT id, category_id, name, description, price_per_hour, price_per_day,
                   is_available, image_url, created_at
            FROM bikes
            WHERE category_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(category.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list bikes for category {}: {:?}", category.id, e);
            AppError::Database(e)
        })?;

        Ok(CategoryDetailDto {
            category: category.into(),
            bikes: bikes.into_iter().map(Into::into).collect(),
        })
    }

    /// Create a category; slugs are unique
    pub async fn create(&self, data: CreateBikeCategory) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, BikeCategory>(
            r#"
            INSERT INTO bike_categories (name, slug, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, image_url, created_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_unique_violation(
                e,
                &format!("Category slug '{}' is already in use", data.slug),
            )
        })?;

        tracing::info!(
            "Category created: id={}, slug={}",
            category.id,
            category.slug
        );

        Ok(category.into())
    }

    /// Delete a category; its bikes (and their bookings) cascade
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM bike_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }
}
