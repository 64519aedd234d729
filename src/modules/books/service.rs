use crate::error::{ServiceError, ServiceResult};
use crate::mapper::Mapper;
use crate::modules::authors::{
    mapper::AuthorMapper, models::AuthorEntity, repository::AuthorRepositoryArc,
};

use super::mapper::BookMapper;
use super::models::{BookDto, BookPatch};
use super::repository::BookRepositoryArc;

/// Book use cases. Author references are resolved against the author store.
#[derive(Debug, Clone)]
pub struct BookService {
    books: BookRepositoryArc,
    authors: AuthorRepositoryArc,
    mapper: BookMapper,
}

impl BookService {
    pub fn new(books: BookRepositoryArc, authors: AuthorRepositoryArc) -> Self {
        Self {
            books,
            authors,
            mapper: BookMapper::default(),
        }
    }

    /// Upsert the book stored under `isbn`; the body isbn is overridden.
    pub async fn create_or_replace(&self, isbn: &str, book: BookDto) -> ServiceResult<BookDto> {
        let mut entity = self.mapper.map_from(book);
        entity.isbn = isbn.to_string();
        entity.author = self.resolve_author(entity.author).await?;

        let saved = self.books.save(entity).await?;
        tracing::info!(isbn, "book stored");
        Ok(self.mapper.map_to(saved))
    }

    pub async fn list(&self) -> ServiceResult<Vec<BookDto>> {
        let books = self.books.find_all().await?;
        Ok(books
            .into_iter()
            .map(|book| self.mapper.map_to(book))
            .collect())
    }

    pub async fn get(&self, isbn: &str) -> ServiceResult<BookDto> {
        self.books
            .find_by_isbn(isbn)
            .await?
            .map(|book| self.mapper.map_to(book))
            .ok_or_else(|| ServiceError::not_found("book", isbn))
    }

    /// Merge the supplied fields into an existing book.
    pub async fn partial_update(&self, isbn: &str, patch: BookPatch) -> ServiceResult<BookDto> {
        let mut entity = self
            .books
            .find_by_isbn(isbn)
            .await?
            .ok_or_else(|| ServiceError::not_found("book", isbn))?;

        if let Some(title) = patch.title {
            entity.title = title;
        }
        match patch.author {
            None => {}
            Some(None) => entity.author = None,
            Some(Some(author)) => {
                let author = AuthorMapper.map_from(author);
                entity.author = self.resolve_author(Some(author)).await?;
            }
        }

        let saved = self.books.save(entity).await?;
        tracing::info!(isbn, "book patched");
        Ok(self.mapper.map_to(saved))
    }

    pub async fn delete(&self, isbn: &str) -> ServiceResult<()> {
        self.books.delete_by_isbn(isbn).await?;
        tracing::info!(isbn, "book deleted");
        Ok(())
    }

    /// An author with an id must already exist; one without is created.
    ///
    /// The created author is saved before the book and stays stored if the
    /// book write then fails.
    async fn resolve_author(
        &self,
        author: Option<AuthorEntity>,
    ) -> ServiceResult<Option<AuthorEntity>> {
        match author {
            None => Ok(None),
            Some(AuthorEntity { id: Some(id), .. }) => self
                .authors
                .find_by_id(id)
                .await?
                .map(Some)
                .ok_or_else(|| ServiceError::not_found("author", id)),
            Some(author) => {
                let saved = self.authors.save(author).await?;
                tracing::info!(id = ?saved.id, "author created with book");
                Ok(Some(saved))
            }
        }
    }
}
