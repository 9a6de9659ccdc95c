use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::features::bikes::dtos::{BikeResponseDto, CreateBikeDto, UpdateAvailabilityDto};
use crate::features::bikes::services::BikeService;
use crate::features::bookings::dtos::{
    BookingStatusChangeDto, CompleteBookingsDto, CompleteBookingsResultDto, UpdateBookingStatusDto,
};
use crate::features::bookings::services::BookingService;
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryDto};
use crate::features::categories::services::CategoryService;
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

#[derive(Clone)]
pub struct AdminState {
    pub admin_service: Arc<AdminService>,
    pub category_service: Arc<CategoryService>,
    pub bike_service: Arc<BikeService>,
    pub booking_service: Arc<BookingService>,
    pub user_service: Arc<UserService>,
}

// =============================================================================
// CATEGORIES
// =============================================================================

/// Create a bike category
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AdminState>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = state
        .category_service
        .create(dto.into_new_category()?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some("Category created successfully".to_string()),
            None,
        )),
    ))
}

/// Delete a category together with its bikes and their bookings
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Category not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AdminState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.category_service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted successfully".to_string()),
        None,
    )))
}

// =============================================================================
// BIKES
// =============================================================================

/// List bikes (paginated, filterable)
#[utoipa::path(
    get,
    path = "/api/admin/bikes",
    params(AdminBikeQueryParams),
    responses(
        (status = 200, description = "List of bikes", body = ApiResponse<Vec<BikeResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_bikes(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AdminState>,
    AppQuery(params): AppQuery<AdminBikeQueryParams>,
) -> Result<Json<ApiResponse<Vec<BikeResponseDto>>>> {
    let (items, total) = state
        .bike_service
        .list_paginated(&params.filter(), params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Create a bike in an existing category
#[utoipa::path(
    post,
    path = "/api/admin/bikes",
    request_body = CreateBikeDto,
    responses(
        (status = 201, description = "Bike created", body = ApiResponse<BikeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Category not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_bike(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AdminState>,
    AppJson(dto): AppJson<CreateBikeDto>,
) -> Result<(StatusCode, Json<ApiResponse<BikeResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let bike = state.bike_service.create(dto.into_new_bike()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(bike),
            Some("Bike created successfully".to_string()),
            None,
        )),
    ))
}

/// Set a bike's availability flag directly
#[utoipa::path(
    patch,
    path = "/api/admin/bikes/{id}/availability",
    params(
        ("id" = Uuid, Path, description = "Bike ID")
    ),
    request_body = UpdateAvailabilityDto,
    responses(
        (status = 200, description = "Availability updated", body = ApiResponse<BikeResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Bike not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_bike_availability(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AdminState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateAvailabilityDto>,
) -> Result<Json<ApiResponse<BikeResponseDto>>> {
    let bike = state
        .bike_service
        .set_availability(id, dto.is_available)
        .await?;
    Ok(Json(ApiResponse::success(Some(bike), None, None)))
}

// =============================================================================
// BOOKINGS
// =============================================================================

/// List bookings (paginated, filterable by status)
#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    params(AdminBookingQueryParams),
    responses(
        (status = 200, description = "List of bookings", body = ApiResponse<Vec<AdminBookingDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_bookings(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AdminState>,
    AppQuery(params): AppQuery<AdminBookingQueryParams>,
) -> Result<Json<ApiResponse<Vec<AdminBookingDto>>>> {
    let (items, total) = state
        .admin_service
        .list_bookings(params.status, params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Move a booking to a new status; activating it marks the bike unavailable
#[utoipa::path(
    patch,
    path = "/api/admin/bookings/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<BookingStatusChangeDto>),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Reopened booking overlaps dates booked since")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_booking_status(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AdminState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateBookingStatusDto>,
) -> Result<Json<ApiResponse<BookingStatusChangeDto>>> {
    let change = state
        .booking_service
        .set_booking_status(id, dto.status)
        .await?;
    Ok(Json(ApiResponse::success(Some(change.into()), None, None)))
}

/// Mark bookings completed in bulk
#[utoipa::path(
    post,
    path = "/api/admin/bookings/complete",
    request_body = CompleteBookingsDto,
    responses(
        (status = 200, description = "Bookings completed", body = ApiResponse<CompleteBookingsResultDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn complete_bookings(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AdminState>,
    AppJson(dto): AppJson<CompleteBookingsDto>,
) -> Result<Json<ApiResponse<CompleteBookingsResultDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let completed = state
        .booking_service
        .complete_bookings(&dto.booking_ids)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(CompleteBookingsResultDto { completed }),
        Some(format!("{} booking(s) marked completed", completed)),
        None,
    )))
}

// =============================================================================
// USERS
// =============================================================================

/// List user accounts with profiles (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AdminState>,
    AppQuery(params): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let (items, total) = state
        .user_service
        .list_paginated(params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}
