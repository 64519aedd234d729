use crate::mapper::Mapper;
use crate::modules::authors::mapper::AuthorMapper;

use super::models::{BookDto, BookEntity};

#[derive(Debug, Clone, Copy, Default)]
pub struct BookMapper {
    authors: AuthorMapper,
}

impl Mapper<BookEntity, BookDto> for BookMapper {
    fn map_to(&self, book: BookEntity) -> BookDto {
        BookDto {
            isbn: book.isbn,
            title: book.title,
            author: book.author.map(|author| self.authors.map_to(author)),
        }
    }

    fn map_from(&self, dto: BookDto) -> BookEntity {
        BookEntity {
            isbn: dto.isbn,
            title: dto.title,
            author: dto.author.map(|author| self.authors.map_from(author)),
        }
    }
}
