pub mod admin_dtos;

pub use admin_dtos::{AdminBikeQueryParams, AdminBookingDto, AdminBookingQueryParams};
