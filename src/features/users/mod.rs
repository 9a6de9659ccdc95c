//! Local user accounts.
//!
//! Identity comes from the bearer token; an account links the token's subject
//! to a username and a one-to-one profile.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/users` | Register an account with its profile |
//! | GET | `/api/users/me` | Get the caller's account and profile |
//! | PATCH | `/api/users/me/profile` | Update phone number and address |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
