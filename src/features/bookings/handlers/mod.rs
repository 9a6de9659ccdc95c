pub mod booking_handler;

pub use booking_handler::{
    __path_create_booking, __path_get_my_booking, __path_list_my_bookings, create_booking,
    get_my_booking, list_my_bookings,
};
