//! Administration: catalog management, booking status changes and listings.
//!
//! Every handler requires the `admin` role.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use handlers::AdminState;
pub use services::AdminService;
