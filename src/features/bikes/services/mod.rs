mod bike_service;

pub use bike_service::BikeService;
