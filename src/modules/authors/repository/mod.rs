use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use bookshelf_db::DbResult;

use super::models::AuthorEntity;

pub mod memory;
pub mod postgres;

pub use memory::MemoryAuthorRepository;
pub use postgres::PostgresAuthorRepository;

#[async_trait]
pub trait AuthorRepository: Debug {
    /// Insert when `author.id` is `None` (assigning a fresh id), otherwise
    /// overwrite the row with that id. Returns the stored author.
    async fn save(&self, author: AuthorEntity) -> DbResult<AuthorEntity>;
    async fn find_by_id(&self, id: i64) -> DbResult<Option<AuthorEntity>>;
    /// All authors ordered by id
    async fn find_all(&self) -> DbResult<Vec<AuthorEntity>>;
    async fn exists(&self, id: i64) -> DbResult<bool>;
    /// Removing a missing id is not an error
    async fn delete_by_id(&self, id: i64) -> DbResult<()>;
}

pub type AuthorRepositoryArc = Arc<dyn AuthorRepository + Send + Sync>;
