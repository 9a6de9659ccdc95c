use std::sync::Arc;

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::bikes::dtos::{BikeDetailDto, BikeListQuery, BikeResponseDto, HomeDto};
use crate::features::bikes::services::BikeService;
use crate::features::bookings::services::BookingService;
use crate::shared::types::{ApiResponse, Meta};

#[derive(Clone)]
pub struct BikeState {
    pub bike_service: Arc<BikeService>,
    pub booking_service: Arc<BookingService>,
    pub featured_bike_count: usize,
}

/// Home listing: available bikes and featured selection
#[utoipa::path(
    get,
    path = "/api/home",
    responses(
        (status = 200, description = "Available and featured bikes", body = ApiResponse<HomeDto>),
    ),
    tag = "bikes"
)]
pub async fn home(State(state): State<BikeState>) -> Result<Json<ApiResponse<HomeDto>>> {
    let available = state.bike_service.list_available().await?;
    let dto = HomeDto::from_available(available, state.featured_bike_count);
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// List bikes
#[utoipa::path(
    get,
    path = "/api/bikes",
    params(BikeListQuery),
    responses(
        (status = 200, description = "List of bikes", body = ApiResponse<Vec<BikeResponseDto>>),
        (status = 400, description = "Invalid query")
    ),
    tag = "bikes"
)]
pub async fn list_bikes(
    State(state): State<BikeState>,
    AppQuery(query): AppQuery<BikeListQuery>,
) -> Result<Json<ApiResponse<Vec<BikeResponseDto>>>> {
    let bikes = state.bike_service.list(&query.into()).await?;
    let total = bikes.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(bikes),
        None,
        Some(Meta { total }),
    )))
}

/// Bike detail, including whether it is booked today
#[utoipa::path(
    get,
    path = "/api/bikes/{id}",
    params(
        ("id" = Uuid, Path, description = "Bike ID")
    ),
    responses(
        (status = 200, description = "Bike found", body = ApiResponse<BikeDetailDto>),
        (status = 404, description = "Bike not found")
    ),
    tag = "bikes"
)]
pub async fn get_bike(
    State(state): State<BikeState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<BikeDetailDto>>> {
    let bike = state.bike_service.get_with_category(id).await?;
    let booked_today = state.booking_service.is_booked_today(id).await?;
    Ok(Json(ApiResponse::success(
        Some(BikeDetailDto::new(bike, booked_today)),
        None,
        None,
    )))
}
