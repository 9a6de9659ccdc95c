mod booking;

pub use booking::{Booking, BookingStatus, BookingStatusChange, BookingWithBike, NewBooking};
