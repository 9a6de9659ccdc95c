pub mod admin;
pub mod auth;
pub mod bikes;
pub mod bookings;
pub mod categories;
pub mod users;
