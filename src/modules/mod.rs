pub mod authors;
pub mod books;

use std::sync::Arc;

use bookshelf_kernel::ModuleRegistry;
use sqlx::PgPool;

use authors::repository::{
    AuthorRepositoryArc, MemoryAuthorRepository, PostgresAuthorRepository,
};
use books::repository::{BookRepositoryArc, MemoryBookRepository, PostgresBookRepository};

/// Repositories shared by the resource modules.
#[derive(Debug, Clone)]
pub struct Stores {
    pub authors: AuthorRepositoryArc,
    pub books: BookRepositoryArc,
}

impl Stores {
    /// Process-local stores. The book store reads authors from the same table
    /// the authors module writes to.
    pub fn memory() -> Self {
        let authors = MemoryAuthorRepository::new();
        let books = MemoryBookRepository::new(authors.clone());
        Self {
            authors: Arc::new(authors),
            books: Arc::new(books),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            authors: Arc::new(PostgresAuthorRepository::new(pool.clone())),
            books: Arc::new(PostgresBookRepository::new(pool)),
        }
    }
}

/// Register all resource modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, stores: &Stores) {
    registry.register_custom(authors::create_module(stores.authors.clone()));
    registry.register_custom(books::create_module(
        stores.books.clone(),
        stores.authors.clone(),
    ));
}
