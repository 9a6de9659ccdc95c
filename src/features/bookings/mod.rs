//! Booking admission, pricing and the caller's booking views.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/bikes/{id}/bookings` | Yes | Book a bike for a date range |
//! | GET | `/api/bookings` | Yes | List the caller's bookings |
//! | GET | `/api/bookings/{id}` | Yes | Get one of the caller's bookings |
//!
//! Status changes live under the admin routes.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::BookingService;
