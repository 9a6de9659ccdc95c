pub mod bike_handler;

pub use bike_handler::{
    __path_get_bike, __path_home, __path_list_bikes, get_bike, home, list_bikes, BikeState,
};
