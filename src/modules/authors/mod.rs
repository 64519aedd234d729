pub mod mapper;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_kernel::{InitCtx, Migration, Module};
use utoipa_axum::router::OpenApiRouter;

use repository::AuthorRepositoryArc;
use service::AuthorService;

/// Authors resource: `/authors` CRUD backed by an author repository
pub struct AuthorsModule {
    service: AuthorService,
}

impl AuthorsModule {
    pub fn new(repository: AuthorRepositoryArc) -> Self {
        Self {
            service: AuthorService::new(repository),
        }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            backend = ?ctx.settings.database.backend,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> OpenApiRouter {
        routes::router(self.service.clone())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS authors (
                    id BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    age INTEGER NOT NULL
                );
                "#,
        }]
    }
}

/// Create a new instance of the authors module
pub fn create_module(repository: AuthorRepositoryArc) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(repository))
}
