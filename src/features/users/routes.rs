use crate::features::users::handlers::user_handler;
use crate::features::users::services::UserService;
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users", post(user_handler::create_user))
        .route("/api/users/me", get(user_handler::get_me))
        .route("/api/users/me/profile", patch(user_handler::update_profile))
        .with_state(service)
}
