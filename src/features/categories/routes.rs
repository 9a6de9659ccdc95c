use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers::{get_category, list_categories};
use crate::features::categories::services::CategoryService;

/// Public catalog routes for bike categories
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{slug}", get(get_category))
        .with_state(service)
}
