mod bike;

pub use bike::{Bike, BikeFilter, BikeWithCategory, CreateBike};
