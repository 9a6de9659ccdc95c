use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::bikes::handlers::{self, BikeState};
use crate::features::bikes::services::BikeService;
use crate::features::bookings::services::BookingService;

/// Public catalog routes for bikes
pub fn routes(
    bike_service: Arc<BikeService>,
    booking_service: Arc<BookingService>,
    featured_bike_count: usize,
) -> Router {
    let state = BikeState {
        bike_service,
        booking_service,
        featured_bike_count,
    };

    Router::new()
        .route("/api/home", get(handlers::home))
        .route("/api/bikes", get(handlers::list_bikes))
        .route("/api/bikes/{id}", get(handlers::get_bike))
        .with_state(state)
}
