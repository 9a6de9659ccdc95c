use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{CreateUser, UpdateProfile, UserWithProfile};

/// Account with its profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub profile: ProfileDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl From<UserWithProfile> for UserResponseDto {
    fn from(u: UserWithProfile) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            profile: ProfileDto {
                phone_number: u.phone_number,
                address: u.address,
            },
            created_at: u.created_at,
        }
    }
}

/// Request DTO for registering the caller's account
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        regex(
            path = "*crate::shared::validation::USERNAME_REGEX",
            message = "Username must start with letter or underscore and contain only alphanumeric characters and underscores"
        )
    )]
    pub username: String,

    #[validate(email(message = "Email must be a valid address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Phone number must contain digits, spaces, dashes or parentheses (max 20 characters)"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[validate(length(max = 500, message = "Address must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CreateUserDto {
    pub fn into_new_user(self, subject: &str) -> CreateUser {
        CreateUser {
            subject: subject.to_string(),
            username: self.username,
            email: blank_to_none(self.email),
            phone_number: blank_to_none(self.phone_number),
            address: blank_to_none(self.address),
        }
    }
}

/// Request DTO for updating the caller's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Phone number must contain digits, spaces, dashes or parentheses (max 20 characters)"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[validate(length(max = 500, message = "Address must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<UpdateProfileDto> for UpdateProfile {
    fn from(dto: UpdateProfileDto) -> Self {
        Self {
            phone_number: dto.phone_number.map(|s| s.trim().to_string()),
            address: dto.address.map(|s| s.trim().to_string()),
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
