//! Bike categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | List categories |
//! | GET | `/api/categories/{slug}` | No | Category with its bikes |
//!
//! Creation and deletion are exposed through the admin feature.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
