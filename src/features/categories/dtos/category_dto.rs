use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::bikes::dtos::BikeResponseDto;
use crate::features::categories::models::{BikeCategory, CreateBikeCategory};
use crate::shared::validation::{slugify, SLUG_REGEX};

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BikeCategory> for CategoryResponseDto {
    fn from(c: BikeCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            image_url: c.image_url,
            created_at: c.created_at,
        }
    }
}

/// Category together with the bikes it owns
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetailDto {
    #[serde(flatten)]
    pub category: CategoryResponseDto,
    pub bikes: Vec<BikeResponseDto>,
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Derived from `name` when omitted
    #[validate(
        length(max = 120, message = "Slug must not exceed 120 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug must be lowercase alphanumeric words separated by single hyphens"
        )
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CreateCategoryDto {
    /// Resolve the slug (explicit or derived) into an insertable record
    pub fn into_new_category(self) -> Result<CreateBikeCategory> {
        let slug = match self.slug.filter(|s| !s.is_empty()) {
            Some(slug) => slug,
            None => slugify(&self.name),
        };

        if !SLUG_REGEX.is_match(&slug) {
            return Err(AppError::Validation(format!(
                "Cannot derive a URL slug from name '{}'",
                self.name
            )));
        }

        Ok(CreateBikeCategory {
            name: self.name.trim().to_string(),
            slug,
            image_url: self.image_url,
        })
    }
}
