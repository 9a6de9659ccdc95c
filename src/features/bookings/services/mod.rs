pub mod availability;
mod booking_service;

pub use booking_service::BookingService;
