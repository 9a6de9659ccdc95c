use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::bookings::handlers;
use crate::features::bookings::services::BookingService;

/// Authenticated booking routes
pub fn routes(service: Arc<BookingService>) -> Router {
    Router::new()
        .route("/api/bikes/{id}/bookings", post(handlers::create_booking))
        .route("/api/bookings", get(handlers::list_my_bookings))
        .route("/api/bookings/{id}", get(handlers::get_my_booking))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_rider_user, lazy_pool, with_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use uuid::Uuid;

    fn server(authenticated: bool) -> TestServer {
        let router = routes(Arc::new(BookingService::new(lazy_pool())));
        let router = if authenticated {
            with_auth(router, create_rider_user())
        } else {
            router
        };
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_create_booking_requires_authentication() {
        let response = server(false)
            .post(&format!("/api/bikes/{}/bookings", Uuid::new_v4()))
            .json(&json!({ "startDate": "2024-01-01", "endDate": "2024-01-03" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_booking_rejects_reversed_dates() {
        let response = server(true)
            .post(&format!("/api/bikes/{}/bookings", Uuid::new_v4()))
            .json(&json!({ "startDate": "2024-01-05", "endDate": "2024-01-01" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_create_booking_rejects_malformed_date() {
        let response = server(true)
            .post(&format!("/api/bikes/{}/bookings", Uuid::new_v4()))
            .json(&json!({ "startDate": "tomorrow", "endDate": "2024-01-01" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_booking_rejects_missing_field() {
        let response = server(true)
            .post(&format!("/api/bikes/{}/bookings", Uuid::new_v4()))
            .json(&json!({ "startDate": "2024-01-01" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_bike_id_is_bad_request() {
        let response = server(true)
            .post("/api/bikes/not-a-uuid/bookings")
            .json(&json!({ "startDate": "2024-01-01", "endDate": "2024-01-01" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_bookings_requires_authentication() {
        let response = server(false).get("/api/bookings").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}
