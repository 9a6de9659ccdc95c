//! Bike catalog.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/home` | No | Available bikes plus featured selection |
//! | GET | `/api/bikes` | No | List bikes (availability, category, name filters) |
//! | GET | `/api/bikes/{id}` | No | Bike detail with today's availability message |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::BikeService;
