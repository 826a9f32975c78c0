mod category_dto;

pub use category_dto::{
    CategoryDetailDto, CategoryListItemDto, CategoryRefDto, CategoryResponseDto,
    CreateCategoryDto, UpdateCategoryDto,
};
