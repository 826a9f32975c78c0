mod data_log_dto;
mod infrastructure_dto;
mod location_dto;

pub use data_log_dto::{DataLogDto, DataLogUserDto};
pub use infrastructure_dto::InfrastructureDto;
pub use location_dto::{
    CreateLocationDto, DeleteLocationQuery, LocationDetailDto, LocationDto, LocationFilter,
    LocationListItemDto, LocationListQuery, UpdateLocationDto,
};
