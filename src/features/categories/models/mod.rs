mod category;

pub use category::{BikeCategory, CreateBikeCategory};
