use crate::mapper::Mapper;

use super::models::{AuthorDto, AuthorEntity};

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorMapper;

impl Mapper<AuthorEntity, AuthorDto> for AuthorMapper {
    fn map_to(&self, author: AuthorEntity) -> AuthorDto {
        AuthorDto {
            id: author.id,
            name: author.name,
            age: author.age,
        }
    }

    fn map_from(&self, dto: AuthorDto) -> AuthorEntity {
        AuthorEntity {
            id: dto.id,
            name: dto.name,
            age: dto.age,
        }
    }
}
