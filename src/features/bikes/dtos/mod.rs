pub mod bike_dto;

pub use bike_dto::{
    BikeDetailDto, BikeListQuery, BikeResponseDto, CreateBikeDto, HomeDto, UpdateAvailabilityDto,
};
