use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{CreateUserDto, UpdateProfileDto, UserResponseDto};
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;

/// Register a local account (and profile) for the token's subject
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Account or username already exists")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_user(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let account = service
        .create_user_with_profile(dto.into_new_user(&user.sub))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(account),
            Some("Account created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Account retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No account registered")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let account = service.get_by_subject(&user.sub).await?;
    Ok(Json(ApiResponse::success(Some(account), None, None)))
}

#[utoipa::path(
    patch,
    path = "/api/users/me/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No account registered")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let account = service.update_profile(&user.sub, dto.into()).await?;
    Ok(Json(ApiResponse::success(
        Some(account),
        Some("Profile updated successfully".to_string()),
        None,
    )))
}
