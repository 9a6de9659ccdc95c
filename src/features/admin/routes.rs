use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::admin::handlers::{self, AdminState};

/// Create admin routes (all require the admin role); nested under `/api/admin`
pub fn routes(state: AdminState) -> Router {
    Router::new()
        .route("/categories", post(handlers::create_category))
        .route("/categories/{id}", delete(handlers::delete_category))
        .route(
            "/bikes",
            get(handlers::list_bikes).post(handlers::create_bike),
        )
        .route(
            "/bikes/{id}/availability",
            patch(handlers::set_bike_availability),
        )
        .route("/bookings", get(handlers::list_bookings))
        .route("/bookings/{id}/status", patch(handlers::set_booking_status))
        .route("/bookings/complete", post(handlers::complete_bookings))
        .route("/users", get(handlers::list_users))
        .with_state(state)
}
