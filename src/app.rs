//! Bootstrap: store selection, module registration and the server lifecycle.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use bookshelf_db::DatabaseModule;
use bookshelf_kernel::{
    settings::{DatabaseBackend, Settings},
    InitCtx, ModuleRegistry,
};
use sqlx::PgPool;

use crate::modules::{self, Stores};

/// A registry wired to the configured backend.
pub struct App {
    registry: ModuleRegistry,
    pool: Option<PgPool>,
}

impl App {
    /// In-memory stores; nothing to connect to or migrate.
    pub fn in_memory() -> Self {
        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &Stores::memory());
        Self {
            registry,
            pool: None,
        }
    }

    /// Connect to PostgreSQL and register the `db` core module.
    pub async fn postgres(settings: &Settings) -> anyhow::Result<Self> {
        let pool = bookshelf_db::connect(&settings.database)
            .await
            .context("failed to connect to PostgreSQL")?;

        let mut registry = ModuleRegistry::new();
        registry.register_core(Arc::new(DatabaseModule::new(pool.clone())));
        modules::register_all(&mut registry, &Stores::postgres(pool.clone()));

        Ok(Self {
            registry,
            pool: Some(pool),
        })
    }

    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        match settings.database.backend {
            DatabaseBackend::Memory => Ok(Self::in_memory()),
            DatabaseBackend::Postgres => Self::postgres(settings).await,
        }
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Apply pending migrations. Returns how many scripts ran.
    pub async fn migrate(&self) -> anyhow::Result<usize> {
        let Some(pool) = &self.pool else {
            tracing::info!("memory backend selected, no migrations to apply");
            return Ok(0);
        };

        let migrations = self.registry.collect_migrations();
        let applied = bookshelf_db::migrate(pool, &migrations)
            .await
            .context("failed to apply migrations")?;

        tracing::info!(applied, total = migrations.len(), "migrations complete");
        Ok(applied)
    }

    /// Run the module lifecycle around the HTTP server.
    pub async fn run(
        self,
        settings: &Settings,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let ctx = InitCtx { settings };

        self.registry.init_all(&ctx).await?;
        self.migrate().await?;
        self.registry.start_all(&ctx).await?;

        let served = bookshelf_http::start_server(&self.registry, settings, shutdown).await;

        self.registry.stop_all().await?;
        served
    }
}

/// Serve until Ctrl-C or SIGTERM.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        "bookshelf starting"
    );

    App::from_settings(settings)
        .await?
        .run(settings, bookshelf_http::shutdown_signal())
        .await
}
