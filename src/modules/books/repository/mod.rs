use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use bookshelf_db::DbResult;

use super::models::BookEntity;

pub mod memory;
pub mod postgres;

pub use memory::MemoryBookRepository;
pub use postgres::PostgresBookRepository;

#[async_trait]
pub trait BookRepository: Debug {
    /// Create or replace the book with `book.isbn`. Only the author's id is
    /// stored; the returned book carries the author as currently persisted.
    async fn save(&self, book: BookEntity) -> DbResult<BookEntity>;
    async fn find_by_isbn(&self, isbn: &str) -> DbResult<Option<BookEntity>>;
    /// All books ordered by isbn
    async fn find_all(&self) -> DbResult<Vec<BookEntity>>;
    /// Removing a missing isbn is not an error
    async fn delete_by_isbn(&self, isbn: &str) -> DbResult<()>;
}

pub type BookRepositoryArc = Arc<dyn BookRepository + Send + Sync>;
