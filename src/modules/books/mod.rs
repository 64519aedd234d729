pub mod mapper;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_kernel::{InitCtx, Migration, Module};
use utoipa_axum::router::OpenApiRouter;

use crate::modules::authors::repository::AuthorRepositoryArc;
use repository::BookRepositoryArc;
use service::BookService;

/// Books resource keyed by isbn, each optionally referencing an author
pub struct BooksModule {
    service: BookService,
}

impl BooksModule {
    pub fn new(books: BookRepositoryArc, authors: AuthorRepositoryArc) -> Self {
        Self {
            service: BookService::new(books, authors),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> OpenApiRouter {
        routes::router(self.service.clone())
    }

    // Runs after the authors migrations; ledger order is by module name.
    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    isbn VARCHAR(64) PRIMARY KEY,
                    title TEXT NOT NULL,
                    author_id BIGINT NULL REFERENCES authors (id) ON DELETE SET NULL
                );
                CREATE INDEX IF NOT EXISTS books_author_id_idx ON books (author_id);
                "#,
        }]
    }
}

/// Create a new instance of the books module
pub fn create_module(books: BookRepositoryArc, authors: AuthorRepositoryArc) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(books, authors))
}
