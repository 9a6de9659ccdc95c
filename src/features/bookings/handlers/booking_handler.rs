use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::bookings::dtos::{BookingResponseDto, CreateBookingDto};
use crate::features::bookings::services::BookingService;
use crate::shared::types::{ApiResponse, Meta};

/// Book a bike for an inclusive date range
#[utoipa::path(
    post,
    path = "/api/bikes/{id}/bookings",
    params(
        ("id" = Uuid, Path, description = "Bike ID")
    ),
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingResponseDto>),
        (status = 400, description = "Invalid dates"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Bike or user account not found"),
        (status = 409, description = "Dates overlap an existing booking")
    ),
    tag = "bookings",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_booking(
    user: AuthenticatedUser,
    State(service): State<Arc<BookingService>>,
    AppPath(bike_id): AppPath<Uuid>,
    AppJson(dto): AppJson<CreateBookingDto>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponseDto>>)> {
    let range = dto.into_range()?;
    let booking = service.request_booking(&user, bike_id, range).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(booking.into()),
            Some("Booking created successfully".to_string()),
            None,
        )),
    ))
}

/// List the caller's bookings, most recent first
#[utoipa::path(
    get,
    path = "/api/bookings",
    responses(
        (status = 200, description = "Caller's bookings", body = ApiResponse<Vec<BookingResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "bookings",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_bookings(
    user: AuthenticatedUser,
    State(service): State<Arc<BookingService>>,
) -> Result<Json<ApiResponse<Vec<BookingResponseDto>>>> {
    let bookings: Vec<BookingResponseDto> = service
        .list_for_user(&user)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = bookings.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(bookings),
        None,
        Some(Meta { total }),
    )))
}

/// Get one of the caller's bookings
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = ApiResponse<BookingResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_my_booking(
    user: AuthenticatedUser,
    State(service): State<Arc<BookingService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<BookingResponseDto>>> {
    let booking = service.get_for_user(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(booking.into()), None, None)))
}
